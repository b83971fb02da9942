use crate::prelude::*;

use crate::utils::CCStr;

pub type LResult<T> = Option<Result<T, CCStr>>;
pub type FResource<T> = Resource<Result<T, CCStr>>;

pub trait LoadableFaillibleMapper<T> {
    fn lrmap<R, F: FnOnce(&T) -> R>(&self, f: F) -> LResult<R>;
    fn lrmap_ok<R, F: FnOnce(&T) -> R>(&self, f: F) -> Option<R> {
        self.lrmap(f).and_then(Result::ok)
    }
}
impl<T> LoadableFaillibleMapper<T> for LResult<T> {
    fn lrmap<R, F: FnOnce(&T) -> R>(&self, f: F) -> LResult<R> {
        self.as_ref()
            .map(|inner_result| inner_result.as_ref().map(f).map_err(Clone::clone))
    }
}
impl<T> LoadableFaillibleMapper<T> for FResource<T> {
    fn lrmap<R, F: FnOnce(&T) -> R>(&self, f: F) -> LResult<R> {
        self.read()
            .as_ref()
            .map(|inner_result| inner_result.as_ref().map(f).map_err(Clone::clone))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lrmap_keeps_loading_and_error_states() {
        let loading: LResult<u32> = None;
        assert_eq!(loading.lrmap(|v| v + 1), None);

        let loaded: LResult<u32> = Some(Ok(41));
        assert_eq!(loaded.lrmap(|v| v + 1), Some(Ok(42)));
        assert_eq!(loaded.lrmap_ok(|v| v * 2), Some(82));

        let failed: LResult<u32> = Some(Err("offline".into()));
        assert_eq!(failed.lrmap(|v| v + 1), Some(Err(CCStr::from("offline"))));
        assert_eq!(failed.lrmap_ok(|v| v + 1), None);
    }
}
