/// Builds a [`Document`](crate::Document) from a literal description.
///
/// Evaluates to `Result<Document>`: names are validated exactly as
/// [`Document::add`](crate::Document::add) and
/// [`Section::add`](crate::Section::add) would, so a bad name is an `Err`
/// rather than a panic. Values may be any expression implementing `ToString`.
///
/// # Examples
///
/// ```rust
/// use inidoc::ini;
///
/// let doc = ini! {
///     "server" => {
///         "host" => "localhost",
///         "port" => 8080,
///     },
///     "features" => {
///         "beta" => true,
///     },
/// }
/// .unwrap();
///
/// assert_eq!(doc.get_key("server", "port").unwrap().to_u16().unwrap(), 8080);
/// assert!(ini! { "bad name" => { "k" => 1 } }.is_err());
/// ```
#[macro_export]
macro_rules! ini {
    () => {
        ::core::result::Result::<$crate::Document, $crate::Error>::Ok($crate::Document::new())
    };

    ($($section:literal => { $($key:literal => $value:expr),* $(,)? }),+ $(,)?) => {
        (|| -> $crate::Result<$crate::Document> {
            let mut document = $crate::Document::new();
            $(
                let mut section = $crate::Section::default();
                section.set_name($section)?;
                $(
                    let mut key = $crate::Key::default();
                    key.set_name($key)?;
                    key.set_value(::std::string::ToString::to_string(&$value));
                    section.add(key, false)?;
                )*
                document.add(section, false)?;
            )+
            ::core::result::Result::Ok(document)
        })()
    };
}
