use meshstack::ServiceMetadata;
use meshstack::StackApp;

pub struct AccountsService;
pub struct BillingService;
pub struct PrimaryGateway;
pub struct SecondaryGateway;

impl ServiceMetadata for AccountsService {}
impl ServiceMetadata for BillingService {}

fn main() {
    let mut stack = StackApp::from_env();
    let accounts = stack.add_service::<AccountsService>("accounts");
    let billing = stack.add_service::<BillingService>("billing");

    stack
        .add_gateway::<PrimaryGateway>("edge")
        .with_subgraph(&accounts);

    stack
        .add_gateway::<SecondaryGateway>("edge")
        .with_subgraph(&billing);

    stack.run();
}
