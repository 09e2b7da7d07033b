pub mod read;
pub mod region;

// re-export for cleaner imports
pub use self::read::{MateSide, Read};
pub use self::region::Region;
