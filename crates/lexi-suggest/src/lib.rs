mod client;

pub use client::SuggestionClient;
