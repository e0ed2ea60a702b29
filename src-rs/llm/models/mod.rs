// Provider adapters and the registry that binds them to panels

pub mod provider_handle;
pub mod provider_base;

pub mod gemini;
pub mod openai;
