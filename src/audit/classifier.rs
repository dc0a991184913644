// file: src/audit/classifier.rs
// description: collaborator access classification
// reference: precedence-ordered rule matching over capability maps

use crate::models::permission::{ADMIN, MAINTAIN, PULL, PUSH};
use crate::models::{CapabilityMap, Designation};

/// Derive the designation for one collaborator's capability map.
///
/// Rules are checked in order and the first match wins:
/// admin, then read only (`pull` alone), write only (`push` alone),
/// maintain only (`maintain` alone). Anything else, including mixed grants
/// such as pull+push, is unclassified.
///
/// Admin requires the `admin` permission to be granted and no present
/// permission to be denied. A lone `{"pull": true}` is therefore read only.
pub fn classify(capabilities: &CapabilityMap) -> Designation {
    if capabilities.granted(ADMIN) && capabilities.all_granted() {
        return Designation::Admin;
    }

    if let Some(designation) = [
        (PULL, Designation::ReadOnly),
        (PUSH, Designation::WriteOnly),
        (MAINTAIN, Designation::MaintainOnly),
    ]
    .into_iter()
    .find_map(|(permission, designation)| {
        sole_grant(capabilities, permission).then_some(designation)
    }) {
        return designation;
    }

    Designation::Unclassified
}

fn sole_grant(capabilities: &CapabilityMap, permission: &str) -> bool {
    capabilities.granted(permission) && capabilities.none_granted_except(permission)
}
