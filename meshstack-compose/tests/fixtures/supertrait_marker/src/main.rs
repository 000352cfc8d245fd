use meshstack::StackApp;

pub trait InventoryCapable: meshstack::ServiceMetadata {
    fn shard(&self) -> u32;
}

pub struct InventoryService;
pub struct EdgeGateway;

impl InventoryCapable for InventoryService {
    fn shard(&self) -> u32 {
        0
    }
}

fn main() {
    let mut stack = StackApp::from_env();
    let inventory = stack.add_service::<InventoryService>("inventory");

    stack
        .add_gateway::<EdgeGateway>("edge")
        .with_subgraph(&inventory);

    stack.run();
}
