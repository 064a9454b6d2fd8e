pub mod dimensions;
pub mod margin;
pub mod money;

pub use dimensions::ScreenDimensions;
pub use margin::Margin;
pub use money::{round_half_even, Money};
