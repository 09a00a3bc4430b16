mod header;
mod parsed;

pub use header::TokenHeader;
pub use parsed::ParsedToken;
