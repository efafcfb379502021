pub mod initialize;
pub use initialize::*;

pub mod deposit;
pub use deposit::*;

pub mod withdraw;
pub use withdraw::*;

pub mod swap;
pub use swap::*;