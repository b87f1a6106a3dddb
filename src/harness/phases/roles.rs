use serde_json::json;

use crate::harness::context::{PhaseFlow, RunContext};
use crate::harness::state::Actor;
use crate::http::Call;

pub(super) async fn run(ctx: &mut RunContext<'_>) -> PhaseFlow {
    ctx.step("Getting Owner user info...");
    let exchange = ctx
        .send(Call::get("/user/me").auth(ctx.auth(Actor::Owner)))
        .await;
    if exchange.met() {
        let outcome = &exchange.outcome;
        ctx.check(outcome.succeeded(), "Owner user info retrieved");
        ctx.check(
            outcome.bool_field("/requiresRoleSelection") == Some(true),
            "Role selection required",
        );
    } else {
        ctx.check(false, "Owner user info");
    }

    select_role(ctx, Actor::Owner).await;

    // Sent while the customer has no role yet, so only validation can refuse it
    ctx.step("Testing invalid role...");
    let exchange = ctx
        .send(
            Call::post("/user/select-role", json!({"role": "INVALID"}))
                .auth(ctx.auth(Actor::Customer))
                .expect(400),
        )
        .await;
    ctx.check(exchange.met(), "Invalid role rejected");

    select_role(ctx, Actor::Customer).await;

    ctx.step("Confirming role selection is settled...");
    let exchange = ctx
        .send(Call::get("/user/me").auth(ctx.auth(Actor::Owner)))
        .await;
    ctx.check(
        exchange.met() && exchange.outcome.bool_field("/requiresRoleSelection") == Some(false),
        "Role selection no longer required",
    );

    // A role is set exactly once, whatever is asked for the second time.
    ctx.step("Testing duplicate role selection...");
    for (actor, role, name) in [
        (Actor::Owner, "CUSTOMER", "Duplicate role selection prevented"),
        (Actor::Owner, "OWNER", "Repeated selection of the same role prevented"),
        (Actor::Customer, "OWNER", "Customer role change prevented"),
    ] {
        let exchange = ctx
            .send(
                Call::post("/user/select-role", json!({ "role": role }))
                    .auth(ctx.auth(actor))
                    .expect(400),
            )
            .await;
        ctx.check(exchange.met(), name);
    }

    PhaseFlow::Continue
}

async fn select_role(ctx: &mut RunContext<'_>, actor: Actor) {
    let (label, role) = (actor.label(), actor.role());
    ctx.step(format!("Selecting {} role...", role));

    let exchange = ctx
        .send(Call::post("/user/select-role", json!({ "role": role })).auth(ctx.auth(actor)))
        .await;

    if !exchange.met() {
        ctx.check(false, format!("{} role selection", label));
        return;
    }

    let outcome = &exchange.outcome;
    ctx.check(outcome.succeeded(), format!("{} role selection success", label));
    ctx.check(
        outcome.str_field("/user/role") == Some(role),
        format!("{} role set correctly", label),
    );
}
