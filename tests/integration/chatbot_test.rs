//! Chatbot API integration tests
//!
//! Drive the composed router end to end with mock completion and speech
//! services: text chat, voice chat, health and application bootstrap.

#![allow(dead_code)]

mod bootstrap;
mod chat;
mod common;
mod health;
mod voice_chat;
