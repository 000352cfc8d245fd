use meshstack::ServiceMetadata;
use meshstack::StackApp;

pub struct AccountsService;
pub struct EdgeGateway;

impl ServiceMetadata for AccountsService {}

fn main() {
    let mut stack = StackApp::from_env();
    let accounts = stack.add_service::<AccountsService>("accounts");

    stack
        .add_gateway::<EdgeGateway>("edge")
        .with_subgraph(&inventory);

    stack.run();
}
