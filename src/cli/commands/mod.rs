pub mod report;
pub mod system;
pub mod wallet;

use crate::cli::registry::CommandRegistry;

pub(crate) fn register_all(registry: &mut CommandRegistry) {
    for entry in wallet::definitions()
        .into_iter()
        .chain(report::definitions())
        .chain(system::definitions())
    {
        registry.register(entry);
    }
}
