use serde_json::{json, Value};

use crate::harness::context::{PhaseFlow, RunContext};
use crate::harness::fixtures::ListingFixture;
use crate::harness::state::{Actor, Entity};
use crate::http::{Call, Outcome};

pub(super) async fn run(ctx: &mut RunContext<'_>) -> PhaseFlow {
    let listing = ctx.fixtures.listing.clone();

    ctx.step("Creating Listing (Owner)...");
    let exchange = ctx
        .send(
            Call::post("/listings", listing.payload())
                .auth(ctx.auth(Actor::Owner))
                .expect(201),
        )
        .await;
    if exchange.met() {
        let outcome = &exchange.outcome;
        ctx.check(outcome.succeeded(), "Listing creation success");
        ctx.check(outcome.has_field("/listing"), "Listing data returned");
        ctx.state
            .record_id(Entity::ListingId, outcome.id_field("/listing/_id"));

        let (latitude, longitude) = coordinates(outcome);
        ctx.check(latitude == Some(listing.latitude), "Latitude saved correctly");
        ctx.check(longitude == Some(listing.longitude), "Longitude saved correctly");
        ctx.check(
            outcome.field("/listing/facilities") == Some(&json!(listing.facilities)),
            "Facilities saved",
        );
        ctx.check(
            outcome.field("/listing/images") == Some(&json!(listing.images)),
            "Images saved",
        );
        ctx.check(outcome.has_field("/listing/ownerId"), "Owner info populated");
    } else {
        ctx.check(false, "Listing creation");
    }

    ctx.step("Testing Customer listing creation (should fail)...");
    let exchange = ctx
        .send(
            Call::post("/listings", listing.payload())
                .auth(ctx.auth(Actor::Customer))
                .expect(403),
        )
        .await;
    ctx.check(exchange.met(), "Customer blocked from creating listings");

    ctx.step("Getting all listings...");
    let exchange = ctx.send(Call::get("/listings")).await;
    if exchange.met() {
        let outcome = &exchange.outcome;
        ctx.check(outcome.succeeded(), "Listings retrieval success");
        ctx.check(
            outcome.field("/listings").is_some_and(Value::is_array),
            "Listings array returned",
        );
        ctx.check(outcome.count() > 0, "At least one listing returned");
    } else {
        ctx.check(false, "Listings retrieval");
    }

    match ctx.state.id(Entity::ListingId).map(str::to_string) {
        Some(listing_id) => fetch_single(ctx, &listing, &listing_id).await,
        None => ctx.skip("single listing retrieval", "no listing id was issued"),
    }

    match ctx.state.id(Entity::OwnerId).map(str::to_string) {
        Some(owner_id) => {
            ctx.step("Getting listings by owner...");
            let exchange = ctx
                .send(Call::get(format!("/listings?ownerId={}", owner_id)))
                .await;
            if exchange.met() {
                ctx.check(exchange.outcome.succeeded(), "Owner listings filter success");
                ctx.check(exchange.outcome.count() > 0, "Owner has listings");
            } else {
                ctx.check(false, "Owner listings filter");
            }
        }
        None => ctx.skip("owner listings filter", "no owner id was issued"),
    }

    ctx.step("Testing invalid listing type...");
    let exchange = ctx
        .send(
            Call::post("/listings", listing.with_unknown_type())
                .auth(ctx.auth(Actor::Owner))
                .expect(400),
        )
        .await;
    ctx.check(exchange.met(), "Invalid listing type rejected");

    PhaseFlow::Continue
}

async fn fetch_single(ctx: &mut RunContext<'_>, listing: &ListingFixture, listing_id: &str) {
    ctx.step("Getting single listing...");
    let exchange = ctx.send(Call::get(format!("/listings/{}", listing_id))).await;

    if !exchange.met() {
        ctx.check(false, "Single listing retrieval");
        return;
    }

    let outcome = &exchange.outcome;
    ctx.check(outcome.succeeded(), "Single listing retrieval success");
    ctx.check(outcome.has_field("/listing"), "Single listing data returned");
    ctx.check(outcome.has_field("/listing/ownerId"), "Owner details populated");
    ctx.check(
        coordinates(outcome) == (Some(listing.latitude), Some(listing.longitude)),
        "Coordinates unchanged on fetch",
    );
}

fn coordinates(outcome: &Outcome) -> (Option<f64>, Option<f64>) {
    (
        outcome.field("/listing/latitude").and_then(Value::as_f64),
        outcome.field("/listing/longitude").and_then(Value::as_f64),
    )
}
