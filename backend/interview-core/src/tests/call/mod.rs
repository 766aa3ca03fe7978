mod candidate;
mod clock;
mod machine;
mod transcript;
