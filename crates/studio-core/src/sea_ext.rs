use sea_orm::{
    ColumnTrait, ConnectionTrait, DbErr, EntityTrait, PaginatorTrait, Select,
    sea_query::{Expr, Func, LikeExpr, SimpleExpr},
};

use studio_domain::pagination::PageRequest;

/// Run `select` for one page, returning the rows and the unpaged total.
///
/// Callers must order the select; unordered pagination is unstable.
pub async fn fetch_page<'db, E, C>(
    select: Select<E>,
    db: &'db C,
    page: PageRequest,
) -> Result<(Vec<E::Model>, u64), DbErr>
where
    E: EntityTrait,
    E::Model: Send + Sync + 'db,
    C: ConnectionTrait,
{
    let page = page.clamped();
    let paginator = select.paginate(db, page.size);
    let total = paginator.num_items().await?;
    let items = paginator.fetch_page(page.page - 1).await?;
    Ok((items, total))
}

/// Case-insensitive substring match: `lower(column) LIKE '%needle%'`.
///
/// `%`, `_` and `\` in the needle match literally.
pub fn contains_ci<C: ColumnTrait>(column: C, needle: &str) -> SimpleExpr {
    let pattern = format!("%{}%", escape_like(&needle.to_lowercase()));
    Expr::expr(Func::lower(Expr::col(column))).like(LikeExpr::new(pattern).escape('\\'))
}

fn escape_like(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        if matches!(c, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}
