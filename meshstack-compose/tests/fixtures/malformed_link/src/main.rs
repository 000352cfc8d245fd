use meshstack::ServiceMetadata;
use meshstack::StackApp;

pub struct AccountsService;
pub struct BillingService;
pub struct EdgeGateway;

impl ServiceMetadata for AccountsService {}
impl ServiceMetadata for BillingService {}

fn main() {
    let mut stack = StackApp::from_env();
    let accounts = stack.add_service::<AccountsService>("accounts");
    let billing = stack.add_service::<BillingService>("billing");

    stack
        .add_gateway::<EdgeGateway>("edge")
        .with_subgraph((accounts, billing));

    stack.run();
}
