pub mod chain;

#[cfg(test)]
mod properties;
