use meshstack::ServiceMetadata;

pub struct AccountsService;
pub struct LedgerService;

impl ServiceMetadata for AccountsService {}
impl ServiceMetadata for LedgerService {}
