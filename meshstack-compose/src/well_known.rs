//! Well-known names recognized by the scanner and referenced by emitted code

/// Builder method that declares a typed backend service.
pub const ADD_SERVICE: &str = "add_service";

/// Builder method that declares a typed gateway.
pub const ADD_GATEWAY: &str = "add_gateway";

/// Builder method that links a declared service to a gateway.
pub const WITH_SUBGRAPH: &str = "with_subgraph";

/// Marker trait a type must implement to be declarable as a service.
///
/// Compared by qualified path against the full capability closure of the
/// resolved type, never against the type's own name.
pub const SERVICE_METADATA: &str = "meshstack::ServiceMetadata";

/// Entry-point parameter and return type of the generated `compose` function.
pub const STACK_APP: &str = "::meshstack::StackApp";

/// Runtime gateway descriptor constructed by the generated code.
pub const GATEWAY_INFO: &str = "::meshstack::composition::GatewayInfo";

/// Runtime subgraph descriptor constructed by the generated code.
pub const SUBGRAPH_INFO: &str = "::meshstack::composition::SubgraphInfo";

/// Runtime configuration routine the generated code hands the topology to.
pub const CONFIGURE: &str = "::meshstack::composition::configure";

/// The argument-list literal that triggers composition at runtime.
pub const COMPOSE_COMMAND: &str = "compose";
