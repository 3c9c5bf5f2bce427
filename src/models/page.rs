use serde::{Deserialize, Serialize};

/// List response, normalized from either a bare array or a paged object
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: usize,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl<T> Page<T> {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PageBody<T> {
    Paged {
        #[serde(alias = "items", alias = "results")]
        data: Vec<T>,
        #[serde(default)]
        total: Option<usize>,
        #[serde(default)]
        page: Option<u32>,
        #[serde(default)]
        limit: Option<u32>,
    },
    Plain(Vec<T>),
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Page<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        Ok(match PageBody::deserialize(deserializer)? {
            PageBody::Paged {
                data,
                total,
                page,
                limit,
            } => Page {
                total: total.unwrap_or(data.len()),
                items: data,
                page,
                limit,
            },
            PageBody::Plain(items) => Page {
                total: items.len(),
                items,
                page: None,
                limit: None,
            },
        })
    }
}
