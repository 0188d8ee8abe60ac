//! Server-side HTML rendering for the storefront pages.
//!
//! Pages are rendered to completion on the server. The only script
//! shipped to the browser drives the "load more" button on the home
//! page; everything else is static markup.

use maud::{html, Markup, PreEscaped, DOCTYPE};
use vitrine_core::money::format_brl;
use vitrine_core::Product;

/// Client-side handler for the "load more" button.
///
/// Fetches the next listing batch from `/products/page`, appends one
/// card per product and moves the button's cursor forward. When the
/// response carries no further cursor the button is removed. On
/// failure the button is re-enabled with a retry label and the list
/// already on screen is left untouched.
const LOAD_MORE_SCRIPT: &str = r#"
(function () {
  var button = document.getElementById("load-more");
  if (!button) return;
  var list = document.getElementById("product-list");
  var label = button.textContent;
  button.addEventListener("click", function () {
    button.disabled = true;
    fetch("/products/page?cursor=" + encodeURIComponent(button.dataset.cursor))
      .then(function (res) {
        if (!res.ok) throw new Error("load failed: " + res.status);
        return res.json();
      })
      .then(function (page) {
        page.results.forEach(function (product) {
          var card = document.createElement("a");
          card.href = "/product/" + product.id;
          var title = document.createElement("h1");
          title.textContent = product.title;
          var price = document.createElement("p");
          price.textContent = product.price_formatted;
          card.appendChild(title);
          card.appendChild(price);
          list.appendChild(card);
        });
        if (page.next_page) {
          button.dataset.cursor = page.next_page;
          button.textContent = label;
          button.disabled = false;
        } else {
          button.remove();
        }
      })
      .catch(function () {
        button.textContent = "Tentar novamente";
        button.disabled = false;
      });
  });
})();
"#;

fn layout(title: &str, body: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="pt-BR" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) }
            }
            body { (body) }
        }
    }
}

fn product_card(product: &Product) -> Markup {
    html! {
        @if let Some(id) = &product.id {
            a href={ "/product/" (id) } {
                h1 { (product.title) }
                p { (product.price_formatted) }
            }
        } @else {
            div {
                h1 { (product.title) }
                p { (product.price_formatted) }
            }
        }
    }
}

/// The home page: the first listing batch plus, when a cursor remains,
/// the "load more" button that pulls further batches in place.
#[must_use]
pub fn home_page(products: &[Product], cursor: Option<&str>) -> Markup {
    layout(
        "Home",
        html! {
            main class="container" {
                section class="products" id="product-list" {
                    @for product in products {
                        (product_card(product))
                    }
                }
                @if let Some(cursor) = cursor {
                    button type="button" id="load-more" data-cursor=(cursor) {
                        "Carregar mais.."
                    }
                    script { (PreEscaped(LOAD_MORE_SCRIPT)) }
                }
            }
        },
    )
}

/// A product detail page.
#[must_use]
pub fn product_page(product: &Product, shipping_fee: f64) -> Markup {
    layout(
        &product.title,
        html! {
            main class="container" {
                a class="back" href="/" { "<- Voltar para a lista de produtos" }
                section class="product" {
                    @if let Some(url) = &product.image_url {
                        img src=(url) alt="banner";
                    }
                    aside {
                        h1 { (product.title) }
                        span class="price" { (product.price_formatted) }
                        @if let Some(description) = &product.description {
                            p { (description) }
                        }
                        p class="shipping" {
                            @if shipping_fee > 0.0 {
                                "Frete: " (format_brl(shipping_fee))
                            } @else {
                                "Frete grátis"
                            }
                        }
                        button type="button"
                            onclick="alert('Produto adicionado ao carrinho!')" {
                            "Adicionar ao carrinho"
                        }
                    }
                }
            }
        },
    )
}

/// Shown with a 404 status when a slug resolves to no product.
#[must_use]
pub fn not_found_page() -> Markup {
    layout(
        "Produto não encontrado",
        html! {
            main class="container" {
                a class="back" href="/" { "<- Voltar para a lista de produtos" }
                h1 { "Produto não encontrado" }
                p { "O produto que você procura não existe ou saiu do catálogo." }
            }
        },
    )
}

/// Shown with a 502 status when the content API cannot be reached.
#[must_use]
pub fn error_page() -> Markup {
    layout(
        "Erro",
        html! {
            main class="container" {
                h1 { "Não foi possível carregar os produtos" }
                p { "Tente novamente em alguns instantes." }
            }
        },
    )
}

#[cfg(test)]
mod tests {
    use vitrine_core::Product;

    use super::{home_page, not_found_page, product_page};

    fn product(id: &str, title: &str, price: f64) -> Product {
        Product::new(Some(id.to_owned()), title.to_owned(), price, None, None)
    }

    #[test]
    fn home_page_lists_products_and_the_cursor() {
        let products = vec![
            product("camiseta-preta", "Camiseta preta", 49.9),
            product("caneca", "Caneca", 19.9),
        ];
        let html = home_page(&products, Some("https://cdn.example.io/search?page=2")).into_string();

        assert!(html.contains("Camiseta preta"));
        assert!(html.contains("R$ 49,90"));
        assert!(html.contains("/product/caneca"));
        assert!(html.contains("Carregar mais.."));
        assert!(html.contains("page=2"));
    }

    #[test]
    fn home_page_without_a_cursor_has_no_button() {
        let html = home_page(&[product("caneca", "Caneca", 19.9)], None).into_string();

        assert!(!html.contains("load-more"));
    }

    #[test]
    fn product_page_shows_price_shipping_and_cart_button() {
        let caneca = Product::new(
            Some("caneca".to_owned()),
            "Caneca".to_owned(),
            19.9,
            Some("Caneca de cerâmica".to_owned()),
            Some("https://images.example.io/caneca.png".to_owned()),
        );
        let html = product_page(&caneca, 25.0).into_string();

        assert!(html.contains("Caneca"));
        assert!(html.contains("R$ 19,90"));
        assert!(html.contains("Caneca de cerâmica"));
        assert!(html.contains("https://images.example.io/caneca.png"));
        assert!(html.contains("Frete: R$ 25,00"));
        assert!(html.contains("Produto adicionado ao carrinho!"));
        assert!(html.contains("Voltar para a lista de produtos"));
    }

    #[test]
    fn expensive_products_advertise_free_shipping() {
        let html = product_page(&product("moletom", "Moletom", 129.0), 0.0).into_string();

        assert!(html.contains("Frete grátis"));
    }

    #[test]
    fn not_found_page_keeps_the_back_link() {
        let html = not_found_page().into_string();

        assert!(html.contains("Produto não encontrado"));
        assert!(html.contains("Voltar para a lista de produtos"));
    }
}
