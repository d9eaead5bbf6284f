// Domain-layer modules and shared errors/models
pub mod analysis {
    pub use crate::analysis::*;
}

pub mod intake {
    pub use crate::intake::*;
}

pub mod models {
    pub use crate::models::*;
}

pub mod session {
    pub use crate::session::*;
}

pub mod errors {
    pub use crate::errors::*;
}
