//! Graal isolate handle and forwarding calls.

use std::ffi::CString;
use std::os::raw::c_char;
use std::ptr;

use libloading::Library;
use parking_lot::Mutex;

use crate::error::{CirceError, Result};
use crate::loader::symbols::{GraalIsolate, GraalIsolateThread, NativeApi};
use crate::loader::LibrarySource;
use crate::logging::structured::LogContext;
use crate::marshal::{from_native, to_c_string};

struct IsolateThread(*mut GraalIsolateThread);

// The `Mutex` in `NativeRuntime` only keeps calls from overlapping. Graal ties
// an isolate thread to the OS thread that created it, and DuckDB calls in from
// its worker threads, so cross-thread use relies on the native library
// tolerating it. The five-symbol ABI has no attach call to do better.
unsafe impl Send for IsolateThread {}

/// A loaded native library with its isolate.
pub struct NativeRuntime {
    api: NativeApi,
    thread: Mutex<IsolateThread>,
    source: LibrarySource,
    // Declared last so the table above never outlives the code it points to.
    _library: Option<Library>,
}

impl NativeRuntime {
    /// Create the isolate and take ownership of the library.
    ///
    /// `library` is `None` only when `api` points at code that is always
    /// mapped (statically linked entry points).
    pub fn start(api: NativeApi, library: Option<Library>, source: LibrarySource) -> Result<Self> {
        let mut isolate: *mut GraalIsolate = ptr::null_mut();
        let mut thread: *mut GraalIsolateThread = ptr::null_mut();

        // SAFETY: null params selects the default isolate configuration.
        let rc = unsafe { (api.create_isolate)(ptr::null_mut(), &mut isolate, &mut thread) };
        if rc != 0 || thread.is_null() {
            log::error!("GRAAL_ISOLATE_FAILED rc={} source={}", rc, source);
            return Err(CirceError::IsolateCreation { rc });
        }

        log::info!("GRAAL_ISOLATE_CREATED source={}", source);

        Ok(Self {
            api,
            thread: Mutex::new(IsolateThread(thread)),
            source,
            _library: library,
        })
    }

    pub fn source(&self) -> &LibrarySource {
        &self.source
    }

    /// Cohort expression JSON plus options JSON -> SQL.
    pub fn build_cohort_sql(&self, expr_json: &[u8], options_json: &str) -> Result<String> {
        const FUNCTION: &str = "circe_json_to_sql";
        let expr = to_c_string(FUNCTION, expr_json)?;
        let options = to_c_string(FUNCTION, options_json)?;
        let build = self.api.build_cohort_sql;
        self.call(FUNCTION, |thread| unsafe {
            build(thread, as_arg(&expr), as_arg(&options))
        })
    }

    /// SQL template plus parameters JSON -> rendered SQL.
    pub fn sql_render(&self, sql_template: &str, params_json: &str) -> Result<String> {
        const FUNCTION: &str = "circe_sql_render";
        let template = to_c_string(FUNCTION, sql_template)?;
        let params = to_c_string(FUNCTION, params_json)?;
        let render = self.api.sql_render;
        self.call(FUNCTION, |thread| unsafe {
            render(thread, as_arg(&template), as_arg(&params))
        })
    }

    /// SQL plus target dialect -> translated SQL.
    pub fn sql_translate(&self, sql: &str, target_dialect: &str) -> Result<String> {
        const FUNCTION: &str = "circe_sql_translate";
        let sql = to_c_string(FUNCTION, sql)?;
        let dialect = to_c_string(FUNCTION, target_dialect)?;
        let translate = self.api.sql_translate;
        self.call(FUNCTION, |thread| unsafe {
            translate(thread, as_arg(&sql), as_arg(&dialect))
        })
    }

    /// SQL template, target dialect and parameters JSON -> rendered and
    /// translated SQL.
    pub fn sql_render_translate(
        &self,
        sql_template: &str,
        target_dialect: &str,
        params_json: &str,
    ) -> Result<String> {
        const FUNCTION: &str = "circe_sql_render_translate";
        let template = to_c_string(FUNCTION, sql_template)?;
        let dialect = to_c_string(FUNCTION, target_dialect)?;
        let params = to_c_string(FUNCTION, params_json)?;
        let render_translate = self.api.sql_render_translate;
        self.call(FUNCTION, |thread| unsafe {
            render_translate(thread, as_arg(&template), as_arg(&dialect), as_arg(&params))
        })
    }

    fn call<F>(&self, function: &'static str, native: F) -> Result<String>
    where
        F: FnOnce(*mut GraalIsolateThread) -> *mut c_char,
    {
        let ctx = LogContext::new(function);
        let thread = self.thread.lock();

        let raw = native(thread.0);
        // SAFETY: entry points return null or a NUL-terminated string owned
        // by the isolate, valid at least until the next call on this thread,
        // which the lock rules out.
        let result = unsafe { from_native(function, raw) };
        drop(thread);

        match &result {
            Ok(sql) => log::debug!("{} NATIVE_CALL_OK bytes_out={}", ctx, sql.len()),
            Err(e) => log::warn!("{} NATIVE_CALL_FAILED error={}", ctx, e),
        }
        result
    }
}

// The native signatures take `char*` but never write through it.
fn as_arg(value: &CString) -> *mut c_char {
    value.as_ptr().cast_mut()
}

#[cfg(test)]
pub(crate) mod fake {
    //! A stand-in for the native library built from Rust functions.

    use super::*;
    use std::ffi::CStr;
    use std::os::raw::{c_int, c_void};

    static mut THREAD_TOKEN: u8 = 0;

    fn leak(text: String) -> *mut c_char {
        CString::new(text).unwrap().into_raw()
    }

    unsafe fn read(ptr: *mut c_char) -> String {
        CStr::from_ptr(ptr).to_string_lossy().into_owned()
    }

    unsafe extern "C" fn create_isolate(
        _params: *mut c_void,
        _isolate: *mut *mut GraalIsolate,
        thread: *mut *mut GraalIsolateThread,
    ) -> c_int {
        *thread = ptr::addr_of_mut!(THREAD_TOKEN).cast();
        0
    }

    unsafe extern "C" fn create_isolate_failing(
        _params: *mut c_void,
        _isolate: *mut *mut GraalIsolate,
        _thread: *mut *mut GraalIsolateThread,
    ) -> c_int {
        3
    }

    unsafe extern "C" fn create_isolate_without_thread(
        _params: *mut c_void,
        _isolate: *mut *mut GraalIsolate,
        _thread: *mut *mut GraalIsolateThread,
    ) -> c_int {
        0
    }

    unsafe extern "C" fn build_cohort_sql(
        thread: *mut GraalIsolateThread,
        expr: *mut c_char,
        options: *mut c_char,
    ) -> *mut c_char {
        assert!(!thread.is_null());
        leak(format!("-- cohort {} with {}", read(expr), read(options)))
    }

    unsafe extern "C" fn sql_render(
        _thread: *mut GraalIsolateThread,
        template: *mut c_char,
        params: *mut c_char,
    ) -> *mut c_char {
        let params = read(params);
        if params == "null" {
            return ptr::null_mut();
        }
        leak(read(template).replace("@p", &params))
    }

    unsafe extern "C" fn sql_translate(
        _thread: *mut GraalIsolateThread,
        sql: *mut c_char,
        dialect: *mut c_char,
    ) -> *mut c_char {
        let dialect = read(dialect);
        if dialect == "unknown" {
            return ptr::null_mut();
        }
        leak(format!("/* {} */ {}", dialect, read(sql)))
    }

    unsafe extern "C" fn sql_render_translate(
        _thread: *mut GraalIsolateThread,
        template: *mut c_char,
        dialect: *mut c_char,
        params: *mut c_char,
    ) -> *mut c_char {
        leak(format!(
            "/* {} */ {}",
            read(dialect),
            read(template).replace("@p", &read(params))
        ))
    }

    pub fn api() -> NativeApi {
        NativeApi {
            build_cohort_sql,
            sql_render,
            sql_translate,
            sql_render_translate,
            create_isolate,
        }
    }

    pub fn api_with_failing_isolate() -> NativeApi {
        NativeApi {
            create_isolate: create_isolate_failing,
            ..api()
        }
    }

    pub fn api_without_thread() -> NativeApi {
        NativeApi {
            create_isolate: create_isolate_without_thread,
            ..api()
        }
    }

    pub fn runtime() -> NativeRuntime {
        NativeRuntime::start(api(), None, LibrarySource::Embedded).unwrap()
    }
}
