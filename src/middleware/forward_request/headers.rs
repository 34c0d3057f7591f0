use hyper::header::{HeaderMap, HeaderName};

/// 프록시 경계를 넘어 전달하면 안 되는 hop-by-hop 헤더
pub const HOP_HEADERS: [&str; 8] = [
    "connection",
    "keep-alive",
    "proxy-authenticate",
    "proxy-authorization",
    "te",
    "trailers",
    "transfer-encoding",
    "upgrade",
];

/// `src`의 모든 헤더를 `dst`에 추가합니다. 다중 값 헤더의 순서는 유지됩니다.
pub fn copy_headers(dst: &mut HeaderMap, src: &HeaderMap) {
    for (name, value) in src {
        dst.append(name.clone(), value.clone());
    }
}

/// 지정한 이름의 헤더를 모두 제거합니다.
pub fn remove_headers<'a, I>(headers: &mut HeaderMap, names: I)
where
    I: IntoIterator<Item = &'a str>,
{
    for name in names {
        headers.remove(name);
    }
}

/// hop-by-hop 헤더를 제거합니다.
pub fn remove_hop_headers(headers: &mut HeaderMap) {
    remove_headers(headers, HOP_HEADERS);
}

/// 허용 목록의 헤더를 `src` 값으로 덮어씁니다.
///
/// 기존 값은 항상 지워지고, `src`에 값이 있을 때만 다시 채워집니다.
pub fn override_headers(dst: &mut HeaderMap, src: &HeaderMap, names: &[HeaderName]) {
    for name in names {
        dst.remove(name);
        for value in src.get_all(name) {
            dst.append(name.clone(), value.clone());
        }
    }
}

/// 허용 목록의 헤더를 기존 값 뒤에 추가합니다.
pub fn merge_headers(dst: &mut HeaderMap, src: &HeaderMap, names: &[HeaderName]) {
    for name in names {
        for value in src.get_all(name) {
            dst.append(name.clone(), value.clone());
        }
    }
}
