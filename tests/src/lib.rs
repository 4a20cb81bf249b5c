#[cfg(test)]
mod ipgroup;
#[cfg(test)]
mod utils;
