mod services;

use meshstack::StackApp;

use crate::services::AccountsService;
use crate::services::LedgerService;

pub struct EdgeGateway;

fn main() {
    let mut stack = StackApp::from_env();
    let accounts = stack.add_service::<AccountsService>("accounts");
    let ledger = stack.add_service::<LedgerService>("ledger");

    stack
        .add_gateway::<EdgeGateway>("edge")
        .with_subgraph(&accounts)
        .with_subgraph(&ledger);

    stack.run();
}
