use crate::harness::context::{PhaseFlow, RunContext};
use crate::harness::state::{Actor, Entity};
use crate::http::{Auth, Call};

pub(super) async fn run(ctx: &mut RunContext<'_>) -> PhaseFlow {
    ctx.step("Testing endpoints without authentication...");
    let exchange = ctx.send(Call::get("/user/me").expect(401)).await;
    ctx.check(exchange.met(), "Unauthenticated access blocked");

    let listing = ctx.fixtures.listing.payload();
    let exchange = ctx
        .send(Call::post("/listings", listing).expect(401))
        .await;
    ctx.check(exchange.met(), "Unauthenticated listing creation blocked");

    let review = ctx
        .fixtures
        .review(ctx.state.id_or_absent(Entity::ListingId));
    let exchange = ctx.send(Call::post("/reviews", review).expect(401)).await;
    ctx.check(exchange.met(), "Unauthenticated review creation blocked");

    ctx.step("Testing invalid token...");
    let exchange = ctx
        .send(
            Call::get("/user/me")
                .auth(Auth::Bearer("invalid_token".to_string()))
                .expect(401),
        )
        .await;
    ctx.check(exchange.met(), "Invalid token rejected");

    let exchange = ctx
        .send(
            Call::get("/user/me")
                .auth(Auth::Raw("Basic dXNlcjpwYXNz".to_string()))
                .expect(401),
        )
        .await;
    ctx.check(exchange.met(), "Malformed authorization header rejected");

    ctx.step("Testing role-based access control...");
    let profile = ctx.fixtures.profile.payload();
    let exchange = ctx
        .send(
            Call::post("/owner/profile", profile)
                .auth(ctx.auth(Actor::Customer))
                .expect(403),
        )
        .await;
    ctx.check(exchange.met(), "Customer blocked from owner endpoints");

    PhaseFlow::Continue
}
