use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, spanned::Spanned, ItemFn};

/// Marks a test and routes its `tracing` output through the libtest capture.
///
/// The log level follows `RUST_LOG`, e.g. `RUST_LOG=rxeager=trace cargo test`.
/// The crate using this attribute needs `tracing-subscriber` (with the
/// `env-filter` feature) in its dev-dependencies.
#[proc_macro_attribute]
pub fn test(attr: TokenStream, item: TokenStream) -> TokenStream {
  let input = parse_macro_input!(item as ItemFn);

  let raw_args = proc_macro2::TokenStream::from(attr);
  if !raw_args.is_empty() {
    return TokenStream::from(
      syn::Error::new(raw_args.span(), "rxeager_macro::test does not take arguments")
        .to_compile_error(),
    );
  }

  if let Some(asyncness) = input.sig.asyncness {
    return TokenStream::from(
      syn::Error::new(
        asyncness.span(),
        "rxeager_macro::test only supports sync tests, drive async sources with a scheduler \
         instead",
      )
      .to_compile_error(),
    );
  }

  let ItemFn { attrs, vis, sig, block } = input;
  let expanded = quote! {
    #[test]
    #(#attrs)*
    #vis #sig {
      let _ = ::tracing_subscriber::fmt()
        .with_env_filter(::tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
      #block
    }
  };

  TokenStream::from(expanded)
}
