mod client;
mod round_trip;
