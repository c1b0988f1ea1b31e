/// Wraps a fallible async computation with Redis caching.
///
/// Checks the cache first and returns the hit if present. On a miss the block
/// runs, its value is queued for a background write, and the value is
/// returned. The write never blocks the caller.
///
/// # Arguments
/// * `$cache`: The cache instance. Must have `get_from_cache` and
///   `set_in_background` methods.
/// * `$key`: The `CacheKey` under which the value is stored.
/// * `$ttl`: Time-to-live for the cached value in seconds.
/// * `$block`: The async block computing the value on a miss.
///
/// # Example
/// ```rust,ignore
/// let details = cached!(cache, cache_key, DETAILS_CACHE_TTL, async move {
///     fetch_details_from_api().await
/// });
/// ```
#[macro_export]
macro_rules! cached {
    ($cache:expr, $key:expr, $ttl:expr, $block:expr) => {{
        if let Some(cached) = $cache.get_from_cache(&$key).await? {
            Ok(cached)
        } else {
            let value = $block.await?;
            $cache.set_in_background(&$key, &value, $ttl);
            Ok(value)
        }
    }};
}
