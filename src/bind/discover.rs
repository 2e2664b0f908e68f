//! Field discovery: which members of a settings struct take part in a load,
//! and under which key.

use std::fmt;

use tracing::debug;

use crate::convert::{ConvertError, Setting, SettingType, SettingValue};

type Assign<T> = Box<dyn Fn(&mut T, SettingValue) -> Result<(), ConvertError> + Send + Sync>;

/// A struct whose public fields can be loaded from a setting source.
///
/// Usually derived:
///
/// ```
/// use app_settings::AppSettings;
///
/// #[derive(Default, AppSettings)]
/// #[app_setting]
/// struct Settings {
///     pub name: String,
///     #[app_setting(key = "ServicePort")]
///     pub port: u16,
/// }
///
/// let keys: Vec<_> = app_settings::discover::<Settings>()
///     .iter()
///     .map(|field| field.external_key)
///     .collect();
/// assert_eq!(keys, ["name", "ServicePort"]);
/// ```
///
/// Types that cannot use the derive can build their [`Schema`] by hand.
pub trait AppSettings: Sized + 'static {
    fn schema() -> Schema<Self>;
}

/// Options carried by a field-level marker.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FieldMarker {
    /// Overrides the lookup key; ignored when empty.
    pub key: Option<&'static str>,
    /// Marks the field as the connection-string sink.
    pub connection_string: bool,
}

/// One public field of a settings struct.
pub struct Member<T> {
    name: &'static str,
    marker: Option<FieldMarker>,
    declared_type: SettingType,
    writable: bool,
    assign: Assign<T>,
}

impl<T: 'static> Member<T> {
    /// Registers a field through an accessor returning a mutable reference to it.
    pub fn new<F, A>(name: &'static str, access: A) -> Self
    where
        F: Setting + 'static,
        A: Fn(&mut T) -> &mut F + Send + Sync + 'static,
    {
        Self {
            name,
            marker: None,
            declared_type: F::setting_type(),
            writable: true,
            assign: Box::new(move |target: &mut T, value: SettingValue| {
                *access(target) = F::from_value(value)?;
                Ok(())
            }),
        }
    }

    /// Attaches a field-level marker.
    #[must_use]
    pub fn marked(mut self, marker: FieldMarker) -> Self {
        self.marker = Some(marker);
        self
    }

    /// Shorthand for a marker that only overrides the key.
    #[must_use]
    pub fn key(self, key: &'static str) -> Self {
        let marker = FieldMarker {
            key: Some(key),
            ..self.marker.unwrap_or_default()
        };
        self.marked(marker)
    }

    /// Shorthand for a marker that flags the connection-string sink.
    #[must_use]
    pub fn connection_string(self) -> Self {
        let marker = FieldMarker {
            connection_string: true,
            ..self.marker.unwrap_or_default()
        };
        self.marked(marker)
    }

    /// The field is visible to the binder but must not be assigned.
    #[must_use]
    pub fn read_only(mut self) -> Self {
        self.writable = false;
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn marker(&self) -> Option<&FieldMarker> {
        self.marker.as_ref()
    }
}

impl<T> fmt::Debug for Member<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Member")
            .field("name", &self.name)
            .field("marker", &self.marker)
            .field("declared_type", &self.declared_type)
            .field("writable", &self.writable)
            .finish_non_exhaustive()
    }
}

/// Static shape of a settings struct: its marker and its public fields in
/// declaration order.
#[derive(Debug)]
#[must_use]
pub struct Schema<T> {
    type_name: &'static str,
    marked: bool,
    members: Vec<Member<T>>,
}

impl<T: 'static> Schema<T> {
    pub fn new(type_name: &'static str) -> Self {
        Self {
            type_name,
            marked: false,
            members: Vec::new(),
        }
    }

    /// Marks the whole struct: every member becomes a binding candidate.
    pub fn marked(mut self) -> Self {
        self.marked = true;
        self
    }

    pub fn member(mut self, member: Member<T>) -> Self {
        self.members.push(member);
        self
    }

    pub fn is_marked(&self) -> bool {
        self.marked
    }

    pub fn members(&self) -> &[Member<T>] {
        &self.members
    }
}

/// A field selected for binding, with its key resolved.
pub struct FieldDescriptor<T> {
    pub member_name: &'static str,
    pub external_key: &'static str,
    pub declared_type: SettingType,
    /// The field carries the connection-string marker, whatever its type.
    pub connection_string_marker: bool,
    /// The marker is present and the type is [`SettingType::ConnectionStrings`].
    pub is_connection_string_collection: bool,
    pub writable: bool,
    assign: Assign<T>,
}

impl<T> FieldDescriptor<T> {
    /// Stores a converted value into this field of `target`.
    pub fn assign(&self, target: &mut T, value: SettingValue) -> Result<(), ConvertError> {
        (self.assign)(target, value)
    }
}

impl<T> fmt::Debug for FieldDescriptor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldDescriptor")
            .field("member_name", &self.member_name)
            .field("external_key", &self.external_key)
            .field("declared_type", &self.declared_type)
            .field("connection_string_marker", &self.connection_string_marker)
            .field(
                "is_connection_string_collection",
                &self.is_connection_string_collection,
            )
            .field("writable", &self.writable)
            .finish_non_exhaustive()
    }
}

/// Lists the fields of `T` eligible for binding, in declaration order.
///
/// A field is eligible when `T` itself is marked or the field carries a
/// marker. Computed fresh on every call.
pub fn discover<T: AppSettings>() -> Vec<FieldDescriptor<T>> {
    let schema = T::schema();
    let struct_marked = schema.marked;

    let fields: Vec<_> = schema
        .members
        .into_iter()
        .filter(|member| struct_marked || member.marker.is_some())
        .map(|member| {
            let marker = member.marker.unwrap_or_default();
            let external_key = match marker.key {
                Some(key) if !key.is_empty() => key,
                _ => member.name,
            };
            let is_connection_string_collection = marker.connection_string
                && member.declared_type == SettingType::ConnectionStrings;

            FieldDescriptor {
                member_name: member.name,
                external_key,
                declared_type: member.declared_type,
                connection_string_marker: marker.connection_string,
                is_connection_string_collection,
                writable: member.writable,
                assign: member.assign,
            }
        })
        .collect();

    debug!(
        type_name = schema.type_name,
        marked = struct_marked,
        fields = fields.len(),
        "discovered settings fields"
    );
    fields
}
