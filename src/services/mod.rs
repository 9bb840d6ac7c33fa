pub mod payable;
pub mod price_refresh;
