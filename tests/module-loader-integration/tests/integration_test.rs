//! module-loader 与 di-impl 的端到端集成测试
use autoload_common::{BoxError, DependencyError, Lifetime, LoaderError};
use di_abstractions::{
    Artifact, Instance, ModuleContainer, ModuleContainerExt, RegistrationDescriptor,
    RegistrationStrategy,
};
use di_impl::DiContainerImpl;
use mockall::mock;
use module_loader::{
    load_modules, load_modules_eager, Export, LoadOptions, LoaderSettings, ModuleLoader, ModuleMap,
    ModuleValue, ResolverMarker, SupplyMode,
};
use std::sync::{Arc, Once};

static INIT: Once = Once::new();

fn init_test_logger() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter("module_loader=debug,di_impl=debug")
            .with_test_writer()
            .try_init();
    });
}

#[derive(Debug)]
struct Foo;

#[derive(Debug)]
struct Bar;

#[derive(Debug)]
struct FooBar {
    foo: Arc<Foo>,
}

fn foo_module() -> ModuleValue {
    ModuleValue::new()
        .with_default(Export::callable(Artifact::class(|_| Ok(Foo))))
}

fn bar_module() -> ModuleValue {
    ModuleValue::new()
        .with_export("namedExport", Export::callable(Artifact::function(|_| Ok("helper"))))
        .with_default(Export::callable(Artifact::function(|_| Ok(Bar))))
}

fn foo_bar_module() -> ModuleValue {
    ModuleValue::new()
        .with_export("helper", Export::value(serde_json::json!({ "enabled": true })))
        .with_export(
            "FooBar",
            Export::tagged(Artifact::class(|cradle| {
                Ok(FooBar {
                    foo: cradle.resolve_as::<Foo>("foo")?,
                })
            })),
        )
}

fn sample_modules() -> ModuleMap {
    ModuleMap::new()
        .with_module("./dir/foo.js", foo_module())
        .with_module("./dir/bar.js", bar_module())
        .with_module("./dir/fooBar.index.js", foo_bar_module())
}

fn sample_lazy_modules() -> ModuleMap {
    ModuleMap::new()
        .with_lazy("./dir/foo.js", || async { Ok(foo_module()) })
        .with_lazy("./dir/bar.js", || async { Ok(bar_module()) })
        .with_lazy("./dir/fooBar.index.js", || async { Ok(foo_bar_module()) })
}

mock! {
    Container {}

    impl ModuleContainer for Container {
        fn register(
            &self,
            name: &str,
            descriptor: RegistrationDescriptor,
        ) -> Result<(), DependencyError>;
        fn has_registration(&self, name: &str) -> bool;
        fn resolve(&self, name: &str) -> Result<Instance, DependencyError>;
    }
}

#[test]
fn test_eager_registration_and_resolution() {
    init_test_logger();
    let container = DiContainerImpl::new();

    load_modules_eager(&container, sample_modules(), &LoadOptions::new())
        .unwrap();

    assert_eq!(container.registered_names(), vec!["foo", "bar", "fooBar"]);
    assert!(container.resolve_as::<Foo>("foo").is_ok());
    assert!(container.resolve_as::<Bar>("bar").is_ok());
    assert!(!container.has_registration("namedExport"));

    let foo_bar = container.resolve_as::<FooBar>("fooBar").unwrap();
    assert_eq!(format!("{:?}", foo_bar.foo), "Foo");
}

#[tokio::test]
async fn test_deferred_registration_and_resolution() {
    init_test_logger();
    let container = DiContainerImpl::new();

    load_modules(&container, sample_lazy_modules(), &LoadOptions::new())
        .await
        .unwrap();

    assert_eq!(container.registered_names(), vec!["foo", "bar", "fooBar"]);
    assert!(container.resolve_as::<Foo>("foo").is_ok());
    assert!(container.resolve_as::<Bar>("bar").is_ok());
    assert!(container.resolve_as::<FooBar>("fooBar").is_ok());
    assert!(!container.has_registration("namedExport"));
}

#[tokio::test]
async fn test_deferred_mode_accepts_loaded_modules() {
    let container = DiContainerImpl::new();

    load_modules(&container, sample_modules(), &LoadOptions::new())
        .await
        .unwrap();

    assert_eq!(container.registration_count(), 3);
}

#[test]
fn test_custom_formatter_replaces_default() {
    let container = DiContainerImpl::new();
    let options = LoadOptions::new()
        .with_format_name(|name| name.to_uppercase());

    load_modules_eager(&container, sample_modules(), &options)
        .unwrap();

    assert!(container.has_registration("FOO"));
    assert!(container.has_registration("BAR"));
    assert!(container.has_registration("FOOBAR"));
    assert!(!container.has_registration("foo"));
    assert!(container.resolve_as::<Bar>("BAR").is_ok());
}

#[test]
fn test_eager_mode_rejects_lazy_modules_without_registering() {
    init_test_logger();
    let mut container = MockContainer::new();
    container.expect_register().never();

    let modules = ModuleMap::new()
        .with_module("./dir/foo.js", foo_module())
        .with_lazy("./dir/bar.js", || async { Ok(bar_module()) });

    let error = load_modules_eager(&container, modules, &LoadOptions::new())
        .unwrap_err();
    assert_eq!(error.kind(), "EagerModeViolationError");
    assert!(matches!(
        &error,
        LoaderError::EagerModeViolation { paths, .. } if paths == &vec!["./dir/bar.js".to_string()]
    ));
    assert!(error.to_string().contains("load_modules"));
}

#[test]
fn test_unresolvable_module_rejects_whole_call() {
    let mut container = MockContainer::new();
    container.expect_register().never();

    let helpers = ModuleValue::new()
        .with_export("util", Export::callable(Artifact::function(|_| Ok(1_u32))));
    let modules = sample_modules().with_module("./dir/helpers.js", helpers);

    let error = load_modules_eager(&container, modules, &LoadOptions::new())
        .unwrap_err();
    assert_eq!(error.kind(), "ResolutionError");
    assert_eq!(error.path(), Some("./dir/helpers.js"));
}

#[test]
fn test_container_error_is_propagated() {
    let mut container = MockContainer::new();
    container
        .expect_register()
        .withf(|name, _| name.to_string() == "foo")
        .times(1)
        .returning(|_, _| Err(DependencyError::registration("foo", "容器已冻结")));

    let error = load_modules_eager(&container, sample_modules(), &LoadOptions::new())
        .unwrap_err();
    assert_eq!(error.kind(), "ContainerError");
    assert!(matches!(
        error,
        LoaderError::Container(DependencyError::RegistrationError { ref name, .. }) if name == "foo"
    ));
}

#[tokio::test]
async fn test_lazy_load_failure_reports_path() {
    let mut container = MockContainer::new();
    container.expect_register().never();

    let modules = sample_lazy_modules()
        .with_lazy("./dir/broken.js", || async { Err(BoxError::from("模块语法错误")) });

    let error = load_modules(&container, modules, &LoadOptions::new())
        .await
        .unwrap_err();
    assert_eq!(error.kind(), "ModuleLoadError");
    assert_eq!(error.path(), Some("./dir/broken.js"));
}

#[test]
fn test_explicit_function_strategy_applies_to_classes() {
    let container = DiContainerImpl::new();
    let options = LoadOptions::new()
        .with_register(RegistrationStrategy::Function);

    load_modules_eager(&container, sample_modules(), &options)
        .unwrap();

    assert_eq!(
        container.descriptor_strategy("foo"),
        Some(RegistrationStrategy::Function)
    );
    assert_eq!(
        container.descriptor_strategy("fooBar"),
        Some(RegistrationStrategy::Function)
    );
    // 类形态的制品不能按函数调用
    assert!(matches!(
        container.resolve("foo"),
        Err(DependencyError::DependencyResolutionFailed { .. })
    ));
    assert!(container.resolve_as::<Bar>("bar").is_ok());
}

#[test]
fn test_explicit_class_strategy_constructs_functions() {
    let container = DiContainerImpl::new();
    let options = LoadOptions::new()
        .with_register(RegistrationStrategy::Class);

    load_modules_eager(&container, sample_modules(), &options)
        .unwrap();

    assert_eq!(
        container.descriptor_strategy("bar"),
        Some(RegistrationStrategy::Class)
    );
    assert!(container.resolve_as::<Bar>("bar").is_ok());
}

#[test]
fn test_lifetime_from_options_and_marker() {
    let container = DiContainerImpl::new();
    let modules = ModuleMap::new()
        .with_module("./dir/foo.js", foo_module())
        .with_module(
            "./dir/transientFoo.js",
            ModuleValue::new().with_export(
                "TransientFoo",
                Export::tagged_with(
                    Artifact::class(|_| Ok(Foo)),
                    ResolverMarker::new().with_lifetime(Lifetime::Transient),
                ),
            ),
        );
    let options = LoadOptions::new().with_lifetime(Lifetime::Singleton);

    load_modules_eager(&container, modules, &options).unwrap();

    let first = container.resolve_as::<Foo>("foo").unwrap();
    let second = container.resolve_as::<Foo>("foo").unwrap();
    assert!(Arc::ptr_eq(&first, &second));

    let first = container.resolve_as::<Foo>("transientFoo").unwrap();
    let second = container.resolve_as::<Foo>("transientFoo").unwrap();
    assert!(!Arc::ptr_eq(&first, &second));
}

#[tokio::test]
async fn test_loader_built_from_settings() -> anyhow::Result<()> {
    let settings = LoaderSettings {
        mode: SupplyMode::Eager,
        ..LoaderSettings::default()
    };
    let loader: ModuleLoader = settings.into_loader();
    let container = DiContainerImpl::new();

    let error = loader.load(&container, sample_lazy_modules())
        .await
        .unwrap_err();
    assert_eq!(error.kind(), "EagerModeViolationError");
    assert_eq!(container.registration_count(), 0);

    loader.load(&container, sample_modules()).await?;
    assert_eq!(container.registration_count(), 3);
    Ok(())
}
