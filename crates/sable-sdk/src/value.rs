//! Value handles crossing the native boundary
//!
//! Native callbacks never see the engine's internal value encoding.
//! They receive [`NativeValue`] handles (a stable tagged pair) and the
//! opaque [`HostData`] pointers the host supplied at registration time.

/// Opaque host pointer carried through the binding layer unchanged.
///
/// The engine records these in its binding table and hands them back to
/// accessor callbacks; it never dereferences them. `HostData` is not
/// `Send`/`Sync`: a VM instance and everything bound into it belongs to
/// one logical thread.
#[repr(transparent)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HostData(*mut ());

impl HostData {
    /// A null host pointer, for nodes that carry no per-node data.
    pub const fn null() -> Self {
        HostData(std::ptr::null_mut())
    }

    /// Wrap a raw host pointer.
    pub fn from_ptr(ptr: *mut ()) -> Self {
        HostData(ptr)
    }

    /// Get the raw pointer back.
    ///
    /// Dereferencing it is the host's responsibility; the pointer is
    /// only meaningful to the code that registered it.
    pub fn as_ptr(&self) -> *mut () {
        self.0
    }

    /// Check whether this is the null pointer.
    pub fn is_null(&self) -> bool {
        self.0.is_null()
    }
}

impl Default for HostData {
    fn default() -> Self {
        Self::null()
    }
}

/// Native value handle for extension callbacks.
///
/// A lightweight tagged pair: primitives are stored inline, everything
/// else is an opaque pointer owned by the engine. The layout is
/// `repr(C)` so the same handle can cross a C ABI unchanged.
#[repr(C)]
#[derive(Clone, Copy)]
pub struct NativeValue {
    tag: u8,
    data: u64,
}

// Value type tags
const TAG_NULL: u8 = 0;
const TAG_BOOL: u8 = 1;
const TAG_I32: u8 = 2;
const TAG_F64: u8 = 3;
const TAG_PTR: u8 = 4;

impl NativeValue {
    /// Create a null value
    pub fn null() -> Self {
        NativeValue {
            tag: TAG_NULL,
            data: 0,
        }
    }

    /// Create a boolean value
    pub fn bool(b: bool) -> Self {
        NativeValue {
            tag: TAG_BOOL,
            data: b as u64,
        }
    }

    /// Create a 32-bit integer value
    pub fn i32(i: i32) -> Self {
        NativeValue {
            tag: TAG_I32,
            data: i as u64,
        }
    }

    /// Create a 64-bit float value
    pub fn f64(f: f64) -> Self {
        NativeValue {
            tag: TAG_F64,
            data: f.to_bits(),
        }
    }

    /// Create from an opaque engine pointer.
    ///
    /// # Safety
    /// The pointer must stay valid for as long as the handle is used;
    /// the engine guarantees this for values it passes into callbacks.
    pub unsafe fn from_ptr(ptr: *mut ()) -> Self {
        NativeValue {
            tag: TAG_PTR,
            data: ptr as u64,
        }
    }

    /// Check if this is a null value
    pub fn is_null(&self) -> bool {
        self.tag == TAG_NULL
    }

    /// Check if this is an opaque pointer value
    pub fn is_ptr(&self) -> bool {
        self.tag == TAG_PTR
    }

    /// Get as boolean if this is a bool
    pub fn as_bool(&self) -> Option<bool> {
        if self.tag == TAG_BOOL {
            Some(self.data != 0)
        } else {
            None
        }
    }

    /// Get as i32 if this is an i32
    pub fn as_i32(&self) -> Option<i32> {
        if self.tag == TAG_I32 {
            Some(self.data as i32)
        } else {
            None
        }
    }

    /// Get as f64 if this is an f64
    pub fn as_f64(&self) -> Option<f64> {
        if self.tag == TAG_F64 {
            Some(f64::from_bits(self.data))
        } else {
            None
        }
    }

    /// Get as opaque pointer if this is a pointer value.
    ///
    /// # Safety
    /// The returned pointer is only valid while the engine keeps the
    /// underlying value alive.
    pub unsafe fn as_ptr(&self) -> Option<*mut ()> {
        if self.tag == TAG_PTR {
            Some(self.data as *mut ())
        } else {
            None
        }
    }

    /// Human-readable name of this value's type, for error messages
    pub fn type_name(&self) -> &'static str {
        match self.tag {
            TAG_NULL => "null",
            TAG_BOOL => "bool",
            TAG_I32 => "i32",
            TAG_F64 => "f64",
            TAG_PTR => "object",
            _ => "unknown",
        }
    }
}

impl Default for NativeValue {
    fn default() -> Self {
        Self::null()
    }
}

impl std::fmt::Debug for NativeValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.tag {
            TAG_NULL => write!(f, "NativeValue::Null"),
            TAG_BOOL => write!(f, "NativeValue::Bool({})", self.data != 0),
            TAG_I32 => write!(f, "NativeValue::I32({})", self.data as i32),
            TAG_F64 => write!(f, "NativeValue::F64({})", f64::from_bits(self.data)),
            TAG_PTR => write!(f, "NativeValue::Ptr({:#x})", self.data),
            _ => write!(f, "NativeValue::Unknown(tag={})", self.tag),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_native_value_primitives() {
        let null = NativeValue::null();
        assert!(null.is_null());

        let t = NativeValue::bool(true);
        let f = NativeValue::bool(false);
        assert_eq!(t.as_bool(), Some(true));
        assert_eq!(f.as_bool(), Some(false));

        let i = NativeValue::i32(-7);
        assert_eq!(i.as_i32(), Some(-7));
        assert_eq!(i.as_bool(), None);

        let x = NativeValue::f64(2.5);
        assert_eq!(x.as_f64(), Some(2.5));
    }

    #[test]
    fn test_native_value_ptr_roundtrip() {
        let mut payload = 99u32;
        let raw = &mut payload as *mut u32 as *mut ();

        let v = unsafe { NativeValue::from_ptr(raw) };
        assert!(v.is_ptr());
        assert_eq!(unsafe { v.as_ptr() }, Some(raw));
        assert_eq!(v.type_name(), "object");
    }

    #[test]
    fn test_host_data_roundtrip() {
        let mut payload = 1i64;
        let raw = &mut payload as *mut i64 as *mut ();

        let data = HostData::from_ptr(raw);
        assert!(!data.is_null());
        assert_eq!(data.as_ptr(), raw);

        assert!(HostData::null().is_null());
        assert_eq!(HostData::default(), HostData::null());
    }
}
