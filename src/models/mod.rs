pub mod card;
pub mod resolved;
pub mod set;
pub mod sub;

pub use card::*;
pub use resolved::*;
pub use set::*;
pub use sub::*;
