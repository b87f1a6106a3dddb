use crate::harness::context::{PhaseFlow, RunContext};
use crate::http::Call;

pub(super) async fn run(ctx: &mut RunContext<'_>) -> PhaseFlow {
    let exchange = ctx.send(Call::get("")).await;

    if ctx.check(exchange.met(), "API Health Check") {
        PhaseFlow::Continue
    } else {
        PhaseFlow::abort("Backend API is not responding")
    }
}
