use crate::harness::context::{PhaseFlow, RunContext};
use crate::harness::state::Actor;
use crate::http::Call;

pub(super) async fn run(ctx: &mut RunContext<'_>) -> PhaseFlow {
    ctx.step("Creating Owner Profile...");
    let profile = ctx.fixtures.profile.clone();
    let exchange = ctx
        .send(
            Call::post("/owner/profile", profile.payload())
                .auth(ctx.auth(Actor::Owner))
                .expect(201),
        )
        .await;
    if exchange.met() {
        let outcome = &exchange.outcome;
        ctx.check(outcome.succeeded(), "Owner profile creation success");
        ctx.check(
            outcome.str_field("/profile/contactNumber") == Some(profile.contact_number.as_str()),
            "Contact number saved",
        );
        ctx.check(
            outcome.str_field("/profile/description") == Some(profile.description.as_str()),
            "Description saved",
        );
    } else {
        ctx.check(false, "Owner profile creation");
    }

    ctx.step("Getting Owner Profile...");
    let exchange = ctx
        .send(Call::get("/owner/profile").auth(ctx.auth(Actor::Owner)))
        .await;
    if exchange.met() {
        ctx.check(exchange.outcome.succeeded(), "Owner profile retrieval success");
        ctx.check(exchange.outcome.has_field("/profile"), "Profile data returned");
    } else {
        ctx.check(false, "Owner profile retrieval");
    }

    ctx.step("Testing Customer access to owner profile...");
    let exchange = ctx
        .send(
            Call::get("/owner/profile")
                .auth(ctx.auth(Actor::Customer))
                .expect(403),
        )
        .await;
    ctx.check(exchange.met(), "Customer blocked from owner profile");

    PhaseFlow::Continue
}
