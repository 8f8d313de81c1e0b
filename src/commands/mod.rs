mod pad;

pub use pad::*;
