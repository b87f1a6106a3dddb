use serde_json::Value;

use crate::harness::context::{PhaseFlow, RunContext};
use crate::harness::state::{Actor, Entity};
use crate::http::Call;

pub(super) async fn run(ctx: &mut RunContext<'_>) -> PhaseFlow {
    match ctx.state.id(Entity::ListingId).map(str::to_string) {
        Some(listing_id) => review_listing(ctx, &listing_id).await,
        None => ctx.skip("listing review steps", "no listing id was issued"),
    }

    // Range validation runs whether or not a listing exists.
    ctx.step("Testing invalid rating...");
    let listing_id = ctx.state.id_or_absent(Entity::ListingId).to_string();
    for rating in ctx.fixtures.out_of_range_ratings.clone() {
        let payload = ctx.fixtures.review_with_rating(&listing_id, rating);
        let exchange = ctx
            .send(
                Call::post("/reviews", payload)
                    .auth(ctx.auth(Actor::Customer))
                    .expect(400),
            )
            .await;
        ctx.check(exchange.met(), format!("Out-of-range rating {} rejected", rating));
    }

    PhaseFlow::Continue
}

async fn review_listing(ctx: &mut RunContext<'_>, listing_id: &str) {
    let review = ctx.fixtures.review(listing_id);
    let rating = f64::from(ctx.fixtures.rating);

    ctx.step("Creating review (Customer)...");
    let exchange = ctx
        .send(
            Call::post("/reviews", review.clone())
                .auth(ctx.auth(Actor::Customer))
                .expect(201),
        )
        .await;
    if exchange.met() {
        let outcome = &exchange.outcome;
        ctx.check(outcome.succeeded(), "Review creation success");
        ctx.check(outcome.has_field("/review"), "Review data returned");
        ctx.check(
            outcome.number_field("/review/rating") == Some(rating),
            "Rating saved correctly",
        );
        ctx.state
            .record_id(Entity::ReviewId, outcome.id_field("/review/_id"));
    } else {
        ctx.check(false, "Review creation");
    }

    ctx.step("Testing Owner self-review (should fail)...");
    let exchange = ctx
        .send(
            Call::post("/reviews", review.clone())
                .auth(ctx.auth(Actor::Owner))
                .expect(400),
        )
        .await;
    ctx.check(exchange.met(), "Owner self-review blocked");

    ctx.step("Testing duplicate review (should fail)...");
    let exchange = ctx
        .send(
            Call::post("/reviews", review)
                .auth(ctx.auth(Actor::Customer))
                .expect(400),
        )
        .await;
    ctx.check(exchange.met(), "Duplicate review blocked");

    ctx.step("Getting reviews for listing...");
    let exchange = ctx
        .send(Call::get(format!("/reviews/listing/{}", listing_id)))
        .await;
    if exchange.met() {
        let outcome = &exchange.outcome;
        ctx.check(outcome.succeeded(), "Reviews retrieval success");
        ctx.check(
            outcome.field("/reviews").is_some_and(Value::is_array),
            "Reviews array returned",
        );
        ctx.check(outcome.count() > 0, "At least one review returned");
        ctx.check(outcome.has_field("/averageRating"), "Average rating calculated");
        ctx.check(outcome.count() == 1, "Exactly one review counted");
        ctx.check(
            outcome.number_field("/averageRating") == Some(rating),
            "Average rating matches single review",
        );
    } else {
        ctx.check(false, "Reviews retrieval");
    }

    ctx.step("Getting Customer review history...");
    let exchange = ctx
        .send(Call::get("/reviews/user").auth(ctx.auth(Actor::Customer)))
        .await;
    if exchange.met() {
        ctx.check(exchange.outcome.succeeded(), "Customer review history retrieved");
        ctx.check(
            exchange.outcome.count() > 0,
            "Customer review history includes review",
        );
    } else {
        ctx.check(false, "Customer review history");
    }

    match ctx.state.id(Entity::ReviewId).map(str::to_string) {
        Some(review_id) => {
            ctx.step("Testing Owner deleting Customer review (should fail)...");
            let exchange = ctx
                .send(
                    Call::delete(format!("/reviews/{}", review_id))
                        .auth(ctx.auth(Actor::Owner))
                        .expect(403),
                )
                .await;
            ctx.check(exchange.met(), "Non-author cannot delete review");
        }
        None => ctx.skip("review deletion by non-author", "no review id was issued"),
    }
}
