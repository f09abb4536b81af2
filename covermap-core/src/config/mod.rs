// Environment variable access used by config file substitution.
pub mod env;
