use weft_http::HttpError;

use crate::common::{invalid, split_list};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityTag {
    pub weak: bool,
    pub tag: String,
}

fn is_etagc(byte: u8) -> bool {
    byte == 0x21 || (0x23..=0x7e).contains(&byte) || byte >= 0x80
}

impl EntityTag {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            weak: false,
            tag: tag.into(),
        }
    }

    pub fn weak(tag: impl Into<String>) -> Self {
        Self {
            weak: true,
            tag: tag.into(),
        }
    }

    pub fn parse(value: &str) -> Result<Self, HttpError> {
        let (weak, quoted) = match value.strip_prefix("W/") {
            Some(rest) => (true, rest),
            None => (false, value),
        };
        let tag = quoted
            .strip_prefix('"')
            .and_then(|rest| rest.strip_suffix('"'))
            .ok_or_else(|| invalid(format!("entity tag is not quoted: {value:?}")))?;
        if !tag.bytes().all(is_etagc) {
            return Err(invalid(format!("invalid entity tag contents: {value:?}")));
        }
        Ok(Self {
            weak,
            tag: tag.to_string(),
        })
    }

    pub fn strong_eq(&self, other: &EntityTag) -> bool {
        !self.weak && !other.weak && self.tag == other.tag
    }

    pub fn weak_eq(&self, other: &EntityTag) -> bool {
        self.tag == other.tag
    }

    pub fn to_header_value(&self) -> String {
        if self.weak {
            format!("W/\"{}\"", self.tag)
        } else {
            format!("\"{}\"", self.tag)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ETagList {
    Any,
    Tags(Vec<EntityTag>),
}

impl ETagList {
    pub fn parse(value: &str) -> Result<Self, HttpError> {
        if value.trim() == "*" {
            return Ok(ETagList::Any);
        }
        let tags = split_list(value)
            .into_iter()
            .map(EntityTag::parse)
            .collect::<Result<Vec<_>, _>>()?;
        if tags.is_empty() {
            return Err(invalid("empty entity tag list"));
        }
        Ok(ETagList::Tags(tags))
    }

    pub fn matches_strong(&self, tag: &EntityTag) -> bool {
        match self {
            ETagList::Any => true,
            ETagList::Tags(tags) => tags.iter().any(|candidate| candidate.strong_eq(tag)),
        }
    }

    pub fn matches_weak(&self, tag: &EntityTag) -> bool {
        match self {
            ETagList::Any => true,
            ETagList::Tags(tags) => tags.iter().any(|candidate| candidate.weak_eq(tag)),
        }
    }

    pub fn to_header_value(&self) -> String {
        match self {
            ETagList::Any => "*".to_string(),
            ETagList::Tags(tags) => tags
                .iter()
                .map(EntityTag::to_header_value)
                .collect::<Vec<_>>()
                .join(", "),
        }
    }
}
