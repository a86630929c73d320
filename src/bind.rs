use std::{borrow::Cow, sync::Arc};

/// An owned argument value bound to one placeholder.
#[derive(Debug, Clone, PartialEq)]
pub enum Bind {
    Null,
    String(String),
    StaticString(&'static str),
    Bool(bool),
    F32(f32),
    F64(f64),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),

    // unsigned not so sure about it ?
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),

    Bytes(Vec<u8>),

    #[cfg(feature = "time")]
    Date(time::Date),
    #[cfg(feature = "time")]
    Time(time::Time),
    #[cfg(feature = "time")]
    PrimitiveDateTime(time::PrimitiveDateTime),
    #[cfg(feature = "time")]
    OffsetDateTime(time::OffsetDateTime),

    #[cfg(feature = "chrono")]
    NaiveDate(chrono::NaiveDate),
    #[cfg(feature = "chrono")]
    NaiveTime(chrono::NaiveTime),
    #[cfg(feature = "chrono")]
    NaiveDateTime(chrono::NaiveDateTime),
    #[cfg(feature = "chrono")]
    DateTimeUtc(chrono::DateTime<chrono::Utc>),

    #[cfg(feature = "uuid")]
    Uuid(uuid::Uuid),

    #[cfg(feature = "json")]
    Json(serde_json::Value),
}

/// One argument as supplied by the caller: nothing, a scalar, or a sequence
/// that expands into one placeholder per element.
#[derive(Debug, Default, Clone, PartialEq)]
pub enum Array<T> {
    #[default]
    None,
    One(T),
    Many(Vec<T>),
}

pub type Binds = Array<Bind>;

impl<T> Array<T> {
    pub fn len(&self) -> usize {
        match self {
            Array::None => 0,
            Array::One(_) => 1,
            Array::Many(items) => items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        match self {
            Array::None => <&[T]>::default().iter(),
            Array::One(one) => std::slice::from_ref(one).iter(),
            Array::Many(many) => many.iter(),
        }
    }
}

pub trait IntoBind {
    fn into_bind(self) -> Bind;
}

pub trait IntoBinds {
    fn into_binds(self) -> Binds;
}

impl IntoBinds for Binds {
    fn into_binds(self) -> Binds {
        self
    }
}

impl<T> IntoBinds for T
where
    T: IntoBind,
{
    fn into_binds(self) -> Binds {
        Binds::One(self.into_bind())
    }
}

impl<T> IntoBinds for Vec<T>
where
    T: IntoBind,
{
    fn into_binds(self) -> Binds {
        Binds::Many(self.into_iter().map(IntoBind::into_bind).collect())
    }
}

impl<T> IntoBinds for &[T]
where
    T: IntoBind + Clone,
{
    fn into_binds(self) -> Binds {
        Binds::Many(self.iter().cloned().map(IntoBind::into_bind).collect())
    }
}

impl<T, const N: usize> IntoBinds for [T; N]
where
    T: IntoBind,
{
    fn into_binds(self) -> Binds {
        // a sequence stays a sequence, even with a single element
        Binds::Many(self.into_iter().map(IntoBind::into_bind).collect())
    }
}

/// The ordered argument list of a single predicate or raw fragment.
///
/// Implemented for `()` (no arguments), any single argument, and tuples of
/// arguments up to eight elements.
pub trait IntoArgs {
    fn into_args(self) -> Vec<Binds>;
}

impl IntoArgs for () {
    fn into_args(self) -> Vec<Binds> {
        Vec::new()
    }
}

impl<T> IntoArgs for T
where
    T: IntoBinds,
{
    fn into_args(self) -> Vec<Binds> {
        vec![self.into_binds()]
    }
}

macro_rules! impl_into_args_tuple {
    ( $($name:ident),+ ) => {
        impl<$($name),+> IntoArgs for ($($name,)+)
        where
            $($name: IntoBinds),+
        {
            #[allow(non_snake_case)]
            fn into_args(self) -> Vec<Binds> {
                let ($($name,)+) = self;
                vec![$($name.into_binds()),+]
            }
        }
    };
}

impl_into_args_tuple!(A);
impl_into_args_tuple!(A, B);
impl_into_args_tuple!(A, B, C);
impl_into_args_tuple!(A, B, C, D);
impl_into_args_tuple!(A, B, C, D, E);
impl_into_args_tuple!(A, B, C, D, E, F);
impl_into_args_tuple!(A, B, C, D, E, F, G);
impl_into_args_tuple!(A, B, C, D, E, F, G, H);

impl IntoBind for Bind {
    fn into_bind(self) -> Bind {
        self
    }
}

impl<T> IntoBind for Option<T>
where
    T: IntoBind,
{
    fn into_bind(self) -> Bind {
        if let Some(value) = self {
            value.into_bind()
        } else {
            Bind::Null
        }
    }
}

macro_rules! impl_into_bind {
    ( $($ty:ty => $variant:ident),+ $(,)? ) => {
        $(
            impl IntoBind for $ty {
                #[inline]
                fn into_bind(self) -> Bind {
                    Bind::$variant(self)
                }
            }

            impl IntoBind for &$ty {
                #[inline]
                fn into_bind(self) -> Bind {
                    Bind::$variant(self.clone())
                }
            }

            impl From<$ty> for Bind {
                #[inline]
                fn from(value: $ty) -> Self {
                    Bind::$variant(value)
                }
            }
        )+
    };
}

impl_into_bind!(
    String => String,
    bool => Bool,
    f32 => F32,
    f64 => F64,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
);

#[cfg(feature = "time")]
impl_into_bind!(
    time::Date => Date,
    time::Time => Time,
    time::PrimitiveDateTime => PrimitiveDateTime,
    time::OffsetDateTime => OffsetDateTime,
);

#[cfg(feature = "chrono")]
impl_into_bind!(
    chrono::NaiveDate => NaiveDate,
    chrono::NaiveTime => NaiveTime,
    chrono::NaiveDateTime => NaiveDateTime,
    chrono::DateTime<chrono::Utc> => DateTimeUtc,
);

#[cfg(feature = "uuid")]
impl_into_bind!(uuid::Uuid => Uuid);

#[cfg(feature = "json")]
impl_into_bind!(serde_json::Value => Json);

impl IntoBind for &str {
    #[inline]
    fn into_bind(self) -> Bind {
        Bind::String(self.to_owned())
    }
}

impl IntoBind for Cow<'_, str> {
    #[inline]
    fn into_bind(self) -> Bind {
        Bind::String(self.into_owned())
    }
}

impl IntoBind for Arc<str> {
    #[inline]
    fn into_bind(self) -> Bind {
        Bind::String(self.as_ref().to_owned())
    }
}

impl IntoBind for Box<str> {
    #[inline]
    fn into_bind(self) -> Bind {
        Bind::String(self.into_string())
    }
}

/// Bytes are a single value, not a sequence; wrap them to bind a blob.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Blob(pub Vec<u8>);

impl IntoBind for Blob {
    #[inline]
    fn into_bind(self) -> Bind {
        Bind::Bytes(self.0)
    }
}

impl From<&str> for Bind {
    fn from(value: &str) -> Self {
        Bind::String(value.to_owned())
    }
}
