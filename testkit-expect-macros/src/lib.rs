//! Procedural macros for testkit-expect
//!
//! This crate provides the `#[testkit_expect::test]` attribute macro, which
//! registers a test context around a test function and fails the test at the
//! end if any assertion failed.
//!
//! # Example
//!
//! ```rust,ignore
//! use testkit_expect::prelude::*;
//!
//! #[testkit_expect::test]
//! fn my_test(ctx: TestContext) {
//!     ctx.expect(1 + 1).equals(2);
//!     ctx.expect("abc").has_len(3);
//! }
//! ```

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{
    parse::{Parse, ParseStream},
    parse_macro_input, FnArg, Ident, ItemFn, Lit, Pat, ReturnType, Token, Type,
};

const DEFAULT_TIMEOUT_MS: u64 = 30_000;
const DEFAULT_INTERVAL_MS: u64 = 100;

/// Configuration options for the test macro.
#[derive(Default)]
struct TestConfig {
    /// Polling timeout for `eventually_equals`, in milliseconds
    timeout_ms: Option<u64>,
    /// Polling interval for `eventually_equals`, in milliseconds
    interval_ms: Option<u64>,
    /// Initial time of an injected mock clock, in seconds
    start_time_secs: Option<u64>,
    /// Flavor for tokio runtime ("current_thread" or "multi_thread")
    flavor: Option<String>,
}

impl Parse for TestConfig {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let mut config = TestConfig::default();

        while !input.is_empty() {
            let ident: Ident = input.parse()?;
            input.parse::<Token![=]>()?;
            let lit: Lit = input.parse()?;

            match (ident.to_string().as_str(), lit) {
                ("timeout_ms", Lit::Int(i)) => config.timeout_ms = Some(i.base10_parse()?),
                ("interval_ms", Lit::Int(i)) => config.interval_ms = Some(i.base10_parse()?),
                ("start_time", Lit::Int(i)) => config.start_time_secs = Some(i.base10_parse()?),
                ("flavor", Lit::Str(s)) => config.flavor = Some(s.value()),
                ("timeout_ms" | "interval_ms" | "start_time" | "flavor", lit) => {
                    return Err(syn::Error::new(
                        lit.span(),
                        format!("unexpected value for `{ident}`"),
                    ));
                }
                _ => {
                    return Err(syn::Error::new(
                        ident.span(),
                        format!("unknown attribute: {ident}"),
                    ));
                }
            }

            if input.peek(Token![,]) {
                input.parse::<Token![,]>()?;
            }
        }

        Ok(config)
    }
}

impl TestConfig {
    fn has_poll_config(&self) -> bool {
        self.timeout_ms.is_some() || self.interval_ms.is_some()
    }

    fn poll_bounds(&self) -> (u64, u64) {
        (
            self.timeout_ms.unwrap_or(DEFAULT_TIMEOUT_MS),
            self.interval_ms.unwrap_or(DEFAULT_INTERVAL_MS),
        )
    }
}

/// What an injected parameter asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Injected {
    Context,
    Clock,
}

/// Determines which value a function parameter is requesting, by type name.
fn injected_kind(arg: &FnArg) -> Option<Injected> {
    if let FnArg::Typed(pat_type) = arg {
        if let Type::Path(type_path) = &*pat_type.ty {
            if let Some(segment) = type_path.path.segments.last() {
                if segment.ident == "TestContext" {
                    return Some(Injected::Context);
                }
                if segment.ident == "MockClock" {
                    return Some(Injected::Clock);
                }
            }
        }
    }
    None
}

/// Extracts the parameter name from a function argument.
fn get_param_name(arg: &FnArg) -> Option<&Pat> {
    if let FnArg::Typed(pat_type) = arg {
        Some(&pat_type.pat)
    } else {
        None
    }
}

/// Test attribute macro that registers a test context.
///
/// The generated test registers a context named after the test (which also
/// resets environment variables to the process baseline), runs the body and
/// then finishes the context, failing the test if any assertion failed.
///
/// # Injected Parameters
///
/// - `ctx: TestContext` - the registered context
/// - `clock: MockClock` - a mock clock the context polls on, so
///   `eventually_equals` completes without real waiting
///
/// ```rust,ignore
/// #[testkit_expect::test]
/// fn test_with_clock(ctx: TestContext, clock: MockClock) {
///     ctx.expect(|| 1).eventually_equals(2); // fails after 30 virtual seconds
///     assert_eq!(clock.now(), Duration::from_secs(30));
///     ctx.take_failures();
/// }
/// ```
///
/// # Configuration Options
///
/// - `timeout_ms = 5000` - polling timeout for `eventually_equals`
/// - `interval_ms = 50` - polling interval for `eventually_equals`
/// - `start_time = 100` - start time of the injected mock clock, in seconds
/// - `flavor = "multi_thread"` - tokio runtime flavor for `async fn` tests
///
/// `async fn` tests run on tokio, which must be a dependency of the test crate.
#[proc_macro_attribute]
pub fn test(attr: TokenStream, item: TokenStream) -> TokenStream {
    let config = parse_macro_input!(attr as TestConfig);
    let input = parse_macro_input!(item as ItemFn);

    expand_test(&config, input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

fn expand_test(config: &TestConfig, input: ItemFn) -> syn::Result<TokenStream2> {
    let name = &input.sig.ident;
    let body = &input.block;
    let attrs = &input.attrs;
    let vis = &input.vis;
    let output = &input.sig.output;

    let mut ctx_param = None;
    let mut clock_param = None;
    for arg in &input.sig.inputs {
        match injected_kind(arg) {
            Some(Injected::Context) if ctx_param.is_none() => ctx_param = get_param_name(arg),
            Some(Injected::Clock) if clock_param.is_none() => clock_param = get_param_name(arg),
            _ => {
                return Err(syn::Error::new_spanned(
                    arg,
                    "unsupported test parameter: expected `TestContext` or `MockClock`",
                ));
            }
        }
    }

    // Generate clock initialization
    let (clock_init, clock_builder) = if let Some(clock_name) = clock_param {
        let start_time = config.start_time_secs.unwrap_or(0);
        (
            quote! {
                let #clock_name = ::testkit_expect::clock::MockClock::with_start_time(
                    ::std::time::Duration::from_secs(#start_time)
                );
            },
            quote! { .clock(::std::clone::Clone::clone(&#clock_name)) },
        )
    } else {
        (quote! {}, quote! {})
    };

    let poll_builder = if config.has_poll_config() {
        let (timeout_ms, interval_ms) = config.poll_bounds();
        if interval_ms == 0 || interval_ms > timeout_ms {
            return Err(syn::Error::new(
                proc_macro2::Span::call_site(),
                format!("interval_ms ({interval_ms}) must be non-zero and at most timeout_ms ({timeout_ms})"),
            ));
        }
        quote! {
            .poll_config(
                ::testkit_expect::poll::PollConfig::new(
                    ::std::time::Duration::from_millis(#timeout_ms),
                    ::std::time::Duration::from_millis(#interval_ms),
                )
                .unwrap_or_else(|err| ::testkit_expect::error::fatal(err))
            )
        }
    } else {
        quote! {}
    };

    let ctx_binding = ctx_param.map_or_else(
        || quote! {},
        |ctx_name| quote! { let #ctx_name = ::std::clone::Clone::clone(&__testkit_ctx); },
    );

    let setup = quote! {
        #clock_init
        let __testkit_ctx = ::testkit_expect::register(
            ::testkit_expect::TestContext::builder(
                ::std::concat!(::std::module_path!(), "::", ::std::stringify!(#name))
            )
            #clock_builder
            #poll_builder
            .build()
        );
        #ctx_binding
    };

    let wrapper = if input.sig.asyncness.is_some() {
        let flavor_attr = match config.flavor.as_deref() {
            Some("multi_thread") => quote! { #[::tokio::test(flavor = "multi_thread")] },
            Some("current_thread") | None => quote! { #[::tokio::test] },
            Some(other) => {
                return Err(syn::Error::new(
                    proc_macro2::Span::call_site(),
                    format!("unsupported flavor: {other}. Use \"current_thread\" or \"multi_thread\""),
                ));
            }
        };
        quote! {
            #flavor_attr
            #(#attrs)*
            #vis async fn #name() #output {
                #setup
                let __testkit_result = async move #body.await;
                __testkit_ctx.finish();
                __testkit_result
            }
        }
    } else {
        if config.flavor.is_some() {
            return Err(syn::Error::new_spanned(
                &input.sig,
                "`flavor` only applies to async test functions",
            ));
        }
        let closure_output = match output {
            ReturnType::Default => quote! {},
            ReturnType::Type(arrow, ty) => quote! { #arrow #ty },
        };
        quote! {
            #[::core::prelude::v1::test]
            #(#attrs)*
            #vis fn #name() #output {
                #setup
                let __testkit_result = (move || #closure_output #body)();
                __testkit_ctx.finish();
                __testkit_result
            }
        }
    };

    Ok(wrapper)
}
