use meshstack::ServiceMetadata;
use meshstack::StackApp;

pub struct AccountsService;
pub struct BillingService;
pub struct EdgeGateway;

impl ServiceMetadata for AccountsService {}
impl ServiceMetadata for BillingService {}

fn main() {
    let mut stack = StackApp::from_env();
    let svc = stack.add_service::<AccountsService>("primary");
    let svc = stack.add_service::<BillingService>("primary");

    stack.add_gateway::<EdgeGateway>("edge").with_subgraph(&svc);

    stack.run();
}
