pub mod base64_binary;
pub use base64_binary::*;

pub mod boolean;
pub use boolean::*;

pub mod canonical;
pub use canonical::*;

pub mod code;
pub use code::*;

pub mod date;
pub use date::*;

pub mod date_time;
pub use date_time::*;

pub mod decimal;
pub use decimal::*;

pub mod id;
pub use id::*;

pub mod instant;
pub use instant::*;

pub mod integer;
pub use integer::*;

pub mod integer64;
pub use integer64::*;

pub mod markdown;
pub use markdown::*;

pub mod oid;
pub use oid::*;

pub mod positive_int;
pub use positive_int::*;

pub mod string;
pub use string::*;

pub mod time;
pub use time::*;

pub mod unsigned_int;
pub use unsigned_int::*;

pub mod uri;
pub use uri::*;

pub mod url;
pub use url::*;

pub mod uuid;
pub use uuid::*;

pub mod xhtml;
pub use xhtml::*;
