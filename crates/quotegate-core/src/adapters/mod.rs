mod sim;

pub use sim::SimFeed;
