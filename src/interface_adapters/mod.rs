// Interface adapters: backend client, wire protocol, token storage, and the terminal shell.

pub mod clients;
pub mod protocol;
pub mod state;
pub mod storage;
pub mod terminal;
