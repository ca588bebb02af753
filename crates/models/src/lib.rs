pub mod errors;
pub mod db;
pub mod song;

#[cfg(test)]
mod tests;
