//! 请求级别的记忆表
//!
//! 同一请求内按操作名缓存计算结果，表挂在请求的 extensions 上，
//! 请求结束时随之丢弃，不会跨请求共享。

use actix_web::{HttpMessage, HttpRequest};
use std::any::Any;
use std::collections::HashMap;
use std::future::Future;

#[derive(Default)]
struct RequestMemo {
    entries: HashMap<&'static str, Box<dyn Any>>,
}

/// 读取当前请求中 `key` 对应的缓存值
fn lookup<T: Clone + 'static>(req: &HttpRequest, key: &'static str) -> Option<T> {
    req.extensions()
        .get::<RequestMemo>()
        .and_then(|memo| memo.entries.get(key))
        .and_then(|value| value.downcast_ref::<T>())
        .cloned()
}

fn store<T: 'static>(req: &HttpRequest, key: &'static str, value: T) {
    let mut extensions = req.extensions_mut();
    if let Some(memo) = extensions.get_mut::<RequestMemo>() {
        memo.entries.insert(key, Box::new(value));
        return;
    }

    let mut memo = RequestMemo::default();
    memo.entries.insert(key, Box::new(value));
    extensions.insert(memo);
}

/// 在当前请求内对 `init` 的结果做记忆
///
/// 第一次调用执行 `init` 并保存成功结果；之后同一请求内相同 `key` 的调用直接返回
/// 保存的值。失败结果不缓存。
pub async fn memoized<T, E, F, Fut>(req: &HttpRequest, key: &'static str, init: F) -> Result<T, E>
where
    T: Clone + 'static,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    if let Some(value) = lookup::<T>(req, key) {
        return Ok(value);
    }

    // 不能跨 await 持有 extensions 的借用
    let value = init().await?;
    store(req, key, value.clone());
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;
    use std::cell::Cell;

    #[actix_web::test]
    async fn test_init_runs_once_per_request() {
        let req = TestRequest::default().to_http_request();
        let calls = Cell::new(0);

        for _ in 0..3 {
            let value: Result<Vec<u32>, ()> = memoized(&req, "upload.all", || async {
                calls.set(calls.get() + 1);
                Ok(vec![1, 2, 3])
            })
            .await;
            assert_eq!(value, Ok(vec![1, 2, 3]));
        }

        assert_eq!(calls.get(), 1);
    }

    #[actix_web::test]
    async fn test_keys_are_independent() {
        let req = TestRequest::default().to_http_request();

        let a: Result<&str, ()> = memoized(&req, "a", || async { Ok("first") }).await;
        let b: Result<&str, ()> = memoized(&req, "b", || async { Ok("second") }).await;

        assert_eq!(a, Ok("first"));
        assert_eq!(b, Ok("second"));
    }

    #[actix_web::test]
    async fn test_memo_is_not_shared_between_requests() {
        let first = TestRequest::default().to_http_request();
        let second = TestRequest::default().to_http_request();

        let _: Result<u32, ()> = memoized(&first, "count", || async { Ok(1) }).await;
        let value: Result<u32, ()> = memoized(&second, "count", || async { Ok(2) }).await;

        assert_eq!(value, Ok(2));
    }

    #[actix_web::test]
    async fn test_errors_are_not_cached() {
        let req = TestRequest::default().to_http_request();

        let failed: Result<u32, &str> = memoized(&req, "flaky", || async { Err("boom") }).await;
        assert_eq!(failed, Err("boom"));

        let retried: Result<u32, &str> = memoized(&req, "flaky", || async { Ok(7) }).await;
        assert_eq!(retried, Ok(7));
    }
}
