use anyhow::Result;
use libris_client::LibraryClient;
use libris_core::view::{self, LoadState};
use libris_core::{BookStore, ImageResolver};

/// Resolve a people photo, falling back to the site placeholder if it does
/// not load.
async fn person_image(client: &LibraryClient, resolver: &ImageResolver, path: &str) -> String {
    let url = resolver.resolve_person(path, false);
    let loads = client.probe_image(&url).await;
    resolver.resolve_person(path, !loads)
}

fn print_notice<T>(state: &LoadState<T>) -> Result<bool> {
    match state {
        LoadState::Loading => Ok(false),
        LoadState::Failed(message) => anyhow::bail!("{}", message),
        LoadState::Empty(notice) => {
            println!("  {}", notice);
            Ok(false)
        }
        LoadState::Ready(_) => Ok(true),
    }
}

pub async fn show_home(client: &LibraryClient, page: usize) -> Result<()> {
    println!("\n📖 New Arrivals\n");

    let state = view::new_arrivals(client.list_books().await);
    if !print_notice(&state)? {
        return Ok(());
    }
    let LoadState::Ready(mut carousel) = state else {
        return Ok(());
    };
    carousel.go_to_page(page);

    let resolver = client.resolver();
    for book in carousel.visible() {
        println!("  {}", book.title);
        println!("    by {}", book.author);
        println!("    {}", resolver.resolve(book.cover.as_deref()));
        if !book.description.is_empty() {
            println!("    {}", book.description);
        }
        println!();
    }

    println!("  Page {} of {}", carousel.page(), carousel.page_count());
    let mut hints = Vec::new();
    if carousel.has_prev() {
        hints.push(format!("--page {} for previous", carousel.page() - 1));
    }
    if carousel.has_next() {
        hints.push(format!("--page {} for next", carousel.page() + 1));
    }
    if !hints.is_empty() {
        println!("  ({})", hints.join(", "));
    }

    Ok(())
}

pub async fn show_alumni(client: &LibraryClient) -> Result<()> {
    println!("\n🎓 Alumni / Achievers\n");

    let state = view::alumni(client.list_alumni().await);
    if !print_notice(&state)? {
        return Ok(());
    }

    let resolver = client.resolver();
    for member in state.ready().into_iter().flatten() {
        println!("  {}", member.name);
        println!("    Class of {}", member.batch);
        if !member.designation.is_empty() {
            println!("    {}", member.designation);
        }
        println!("    {}", person_image(client, &resolver, &member.image).await);
        println!();
    }

    Ok(())
}

pub async fn show_team(client: &LibraryClient) -> Result<()> {
    let state = view::team(client.fetch_team().await);
    if !print_notice(&state)? {
        return Ok(());
    }
    let Some(data) = state.ready() else {
        return Ok(());
    };
    let resolver = client.resolver();

    println!("\n👥 Library Advisory Committee\n");
    for member in &data.advisory {
        println!("  {}", member.name);
        if !member.description.is_empty() {
            println!("    {}", member.description);
        }
        println!("    {}", person_image(client, &resolver, &member.image).await);
    }

    println!("\n👥 Library Team\n");
    for member in &data.team {
        println!("  {}", member.name);
        if !member.role.is_empty() {
            println!("    {}", member.role);
        }
        if !member.description.is_empty() {
            println!("    {}", member.description);
        }
        println!("    {}", person_image(client, &resolver, &member.image).await);
    }

    Ok(())
}
