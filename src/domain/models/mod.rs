mod feedback;
mod generation;
mod transcript;
mod turn;

pub use feedback::*;
pub use generation::*;
pub use transcript::*;
pub use turn::*;
