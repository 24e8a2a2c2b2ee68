pub mod change;
pub mod types;

pub use change::{AnalysisResponse, ChangeOperation, OperationType, SuggestedChange};
pub use types::{clause_id_of, Document, DocumentCollection, CLAUSES_FIELD};
