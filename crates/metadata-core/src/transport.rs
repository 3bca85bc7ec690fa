use anyhow::Result;
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};

/// Characters escaped in the `names` query value
const QUERY_VALUE: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'&')
    .add(b'+')
    .add(b',')
    .add(b'<')
    .add(b'=')
    .add(b'>')
    .add(b'?');

/// Authenticated access to the platform API.
///
/// Implementations own authentication and connection handling and hand
/// back the raw response body. Paths are API-relative (`/v3/...`).
pub trait Transport {
    fn get(&self, path: &str) -> Result<String>;

    fn patch(&self, path: &str, body: &str) -> Result<String>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn get(&self, path: &str) -> Result<String> {
        (**self).get(path)
    }

    fn patch(&self, path: &str, body: &str) -> Result<String> {
        (**self).patch(path, body)
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn get(&self, path: &str) -> Result<String> {
        (**self).get(path)
    }

    fn patch(&self, path: &str, body: &str) -> Result<String> {
        (**self).patch(path, body)
    }
}

/// Name-filtered list path, e.g. `/v3/apps?names=myapp`
pub fn list_path(resource: &str, name: &str) -> String {
    format!(
        "/v3/{}s?names={}",
        resource,
        utf8_percent_encode(name, QUERY_VALUE)
    )
}

/// Single resource path, e.g. `/v3/apps/{guid}`
pub fn resource_path(resource: &str, guid: &str) -> String {
    format!("/v3/{}s/{}", resource, guid)
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_path() {
        assert_eq!(list_path("app", "myapp"), "/v3/apps?names=myapp");
        assert_eq!(list_path("space", "dev"), "/v3/spaces?names=dev");
    }

    #[test]
    fn test_list_path_escapes_name() {
        assert_eq!(list_path("app", "my app&x=1"), "/v3/apps?names=my%20app%26x%3D1");
        assert_eq!(list_path("app", "a,b"), "/v3/apps?names=a%2Cb");
    }

    #[test]
    fn test_resource_path() {
        assert_eq!(resource_path("org", "1234-abcd"), "/v3/orgs/1234-abcd");
    }
}
