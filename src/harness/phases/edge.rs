use serde_json::json;

use crate::harness::context::{PhaseFlow, RunContext};
use crate::harness::state::{Actor, Entity, ABSENT_ID};
use crate::http::Call;

pub(super) async fn run(ctx: &mut RunContext<'_>) -> PhaseFlow {
    ctx.step("Testing missing required fields...");
    let exchange = ctx
        .send(
            Call::post("/listings", json!({"title": "Test"}))
                .auth(ctx.auth(Actor::Owner))
                .expect(400),
        )
        .await;
    ctx.check(exchange.met(), "Missing required fields rejected");

    ctx.step("Testing non-existent listing...");
    let exchange = ctx
        .send(Call::get(format!("/listings/{}", ABSENT_ID)).expect(404))
        .await;
    ctx.check(exchange.met(), "Non-existent listing returns 404");

    ctx.step("Testing review for non-existent listing...");
    let review = ctx.fixtures.review(ABSENT_ID);
    let exchange = ctx
        .send(
            Call::post("/reviews", review)
                .auth(ctx.auth(Actor::Customer))
                .expect(404),
        )
        .await;
    ctx.check(exchange.met(), "Review for non-existent listing rejected");

    ctx.step("Testing review without rating...");
    let incomplete = json!({
        "listingId": ctx.state.id_or_absent(Entity::ListingId),
        "comment": "Test comment",
    });
    let exchange = ctx
        .send(
            Call::post("/reviews", incomplete)
                .auth(ctx.auth(Actor::Customer))
                .expect(400),
        )
        .await;
    ctx.check(exchange.met(), "Review without rating rejected");

    PhaseFlow::Continue
}
