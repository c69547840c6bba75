//! SoulConnect Coach - social icebreaker coaching service
//!
//! Analyzes a practice target's profile with a chat-completion model, suggests
//! opening lines, and gives real-time advice on a practice conversation,
//! alongside local keyword sentiment and conversation-flow heuristics.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
