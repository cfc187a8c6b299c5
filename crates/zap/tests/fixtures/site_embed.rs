// @generated by zap. Do not edit.
#![allow(unused_mut, clippy::all)]
/// Whether [`provider`] reads resources from disk.
pub const DEVELOPMENT_MODE: bool = false;
/// Every embedded resource by key.
pub fn registry() -> ::zapped::Registry {
    let mut _393ee9d4d65e251065f5a4ddc09f258856e3a50e5fe23a58d59760285f75f4a2 = ::zapped::EmbeddedDirectory::new();
    _393ee9d4d65e251065f5a4ddc09f258856e3a50e5fe23a58d59760285f75f4a2.insert_file("site.css", b"body {}");
    let _393ee9d4d65e251065f5a4ddc09f258856e3a50e5fe23a58d59760285f75f4a2 = ::std::sync::Arc::new(_393ee9d4d65e251065f5a4ddc09f258856e3a50e5fe23a58d59760285f75f4a2);
    let mut _babf9493234c8d139ccfc4602bc4bea392f1c067f017e95b09ee714b3565a21a = ::zapped::EmbeddedDirectory::new();
    _babf9493234c8d139ccfc4602bc4bea392f1c067f017e95b09ee714b3565a21a.insert_directory("css", ::std::sync::Arc::clone(&_393ee9d4d65e251065f5a4ddc09f258856e3a50e5fe23a58d59760285f75f4a2));
    _babf9493234c8d139ccfc4602bc4bea392f1c067f017e95b09ee714b3565a21a.insert_file("index.html", b"<h1>zap</h1>");
    let _babf9493234c8d139ccfc4602bc4bea392f1c067f017e95b09ee714b3565a21a = ::std::sync::Arc::new(_babf9493234c8d139ccfc4602bc4bea392f1c067f017e95b09ee714b3565a21a);
    let mut registry = ::zapped::Registry::new();
    registry.insert("SITE", ::std::sync::Arc::clone(&_babf9493234c8d139ccfc4602bc4bea392f1c067f017e95b09ee714b3565a21a));
    registry
}
/// The provider to pass to `install` at startup.
pub fn provider() -> ::std::boxed::Box<dyn ::zapped::ResourceProvider> {
    ::std::boxed::Box::new(registry())
}
