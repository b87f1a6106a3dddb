use serde_json::json;

use crate::harness::context::{PhaseFlow, RunContext};
use crate::harness::state::{Actor, Entity};
use crate::http::Call;

const ACTORS: [Actor; 2] = [Actor::Owner, Actor::Customer];

pub(super) async fn run(ctx: &mut RunContext<'_>) -> PhaseFlow {
    for actor in ACTORS {
        if !register(ctx, actor).await {
            return PhaseFlow::abort(format!("{} registration failed", actor.label()));
        }
    }

    let distinct_ids = matches!(
        (ctx.state.id(Entity::OwnerId), ctx.state.id(Entity::CustomerId)),
        (Some(owner), Some(customer)) if owner != customer
    );
    ctx.check(distinct_ids, "Distinct user ids issued");

    let distinct_tokens = matches!(
        (ctx.state.token(Actor::Owner), ctx.state.token(Actor::Customer)),
        (Some(owner), Some(customer)) if owner != customer
    );
    ctx.check(distinct_tokens, "Distinct tokens issued");

    ctx.step("Testing duplicate registration...");
    let payload = ctx.fixtures.owner.registration();
    let exchange = ctx
        .send(Call::post("/auth/register", payload).expect(400))
        .await;
    ctx.check(exchange.met(), "Duplicate registration prevented");

    for actor in ACTORS {
        login(ctx, actor).await;
    }

    ctx.step("Testing invalid login...");
    let exchange = ctx
        .send(
            Call::post(
                "/auth/login",
                json!({"email": "wrong@email.com", "password": "wrongpass"}),
            )
            .expect(400),
        )
        .await;
    ctx.check(exchange.met(), "Invalid login rejected");

    if ctx.state.token(Actor::Owner).is_none() || ctx.state.token(Actor::Customer).is_none() {
        return PhaseFlow::abort("Cannot proceed without valid tokens");
    }

    PhaseFlow::Continue
}

/// Register `actor`; false means the registration itself was refused
async fn register(ctx: &mut RunContext<'_>, actor: Actor) -> bool {
    let label = actor.label();
    ctx.step(format!("Registering {} User...", label));

    let payload = ctx.fixtures.user(actor).registration();
    let exchange = ctx
        .send(Call::post("/auth/register", payload).expect(201))
        .await;

    if !exchange.met() {
        ctx.check(false, format!("{} registration", label));
        return false;
    }

    let outcome = &exchange.outcome;
    ctx.check(outcome.succeeded(), format!("{} registration success", label));
    ctx.check(outcome.has_field("/token"), format!("{} JWT token returned", label));
    ctx.check(outcome.has_field("/user/id"), format!("{} user id returned", label));
    ctx.check(
        outcome.bool_field("/requiresRoleSelection") == Some(true),
        format!("{} requires role selection", label),
    );

    ctx.state
        .record_token(actor, outcome.str_field("/token").map(str::to_string));
    ctx.state
        .record_id(Entity::user(actor), outcome.id_field("/user/id"));
    true
}

async fn login(ctx: &mut RunContext<'_>, actor: Actor) {
    let label = actor.label();
    ctx.step(format!("Testing {} Login...", label));

    let payload = ctx.fixtures.user(actor).login();
    let exchange = ctx.send(Call::post("/auth/login", payload)).await;

    if !exchange.met() {
        ctx.check(false, format!("{} login", label));
        return;
    }

    let outcome = &exchange.outcome;
    ctx.check(outcome.succeeded(), format!("{} login success", label));
    ctx.check(outcome.has_field("/token"), format!("{} login JWT token", label));

    // Registration normally issued the token already; this only fills a gap.
    ctx.state
        .record_token(actor, outcome.str_field("/token").map(str::to_string));
}
