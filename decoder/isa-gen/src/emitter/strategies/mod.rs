pub mod declaration;
pub mod table;
