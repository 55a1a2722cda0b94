//! Response validation
//!
//! Nothing returned by a completion backend or an external agent reaches a
//! proposal without passing through this module.

pub mod extract;
pub mod fields;
pub mod response;

pub use extract::{extract_json_object, field};
pub use response::{
    ClerkSynthesis, PersonaReply, detect_proposal_kind, normalize_delegate_proposal,
};
