// Caller identity
// Tokens handed out at login and checked on card uploads

pub mod jwt;
