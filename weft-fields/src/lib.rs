mod accept;
mod auth;
mod cache;
mod common;
mod cookie;
mod date;
mod digest;
mod etag;
mod media;
mod range;
mod tokens;
mod uri;

pub use accept::{Accept, AcceptCharset, AcceptEncoding, AcceptLanguage, MediaRange, Weighted};
pub use auth::{BasicAuth, BearerToken, DigestAuth};
pub use cache::{Age, CacheControl, CacheDirective, Expires};
pub use cookie::{Cookie, SameSite, SetCookie};
pub use date::HttpDate;
pub use digest::{ContentDigest, WantDigest};
pub use etag::{ETagList, EntityTag};
pub use media::{ContentDisposition, ContentEncoding, ContentLanguage, ContentType, Location};
pub use range::{AcceptRanges, ContentRange, ContentRangeResp, Range, RangeSpec};
pub use tokens::{Connection, Expect, Protocol, Trailer, Upgrade, Vary};
pub use uri::{Host, Uri};
