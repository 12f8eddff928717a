//! Infrastructure 層
//!
//! ドメイン層が定義する trait（Store / SessionGate / EventPusher）の
//! 具体的な実装と、プロトコル境界の DTO を提供します。

pub mod dto;
pub mod pusher;
pub mod repository;
pub mod session;
